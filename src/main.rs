//! Third Spacer landing page, rendered with Yew.
//! Wires routing, site config and the page components together.

use std::rc::Rc;
use third_spacer::SiteConfig;
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod hooks;
mod intake;
mod pages;

use pages::{LandingPage, ProjectsPage};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/projects")]
    Projects,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <LandingPage /> },
        Route::Projects => html! { <ProjectsPage /> },
        Route::NotFound => html! { <Redirect<Route> to={Route::Home} /> },
    }
}

/// Root component: loads the site config once and provides it to every page.
#[function_component]
pub fn App() -> Html {
    let config = use_memo((), |_| SiteConfig::load());

    html! {
        <ContextProvider<Rc<SiteConfig>> context={config}>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ContextProvider<Rc<SiteConfig>>>
    }
}

/// Entry point: installs the panic hook and logger, then renders the app.
fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Third Spacer landing page starting");
    yew::Renderer::<App>::new().render();
}
