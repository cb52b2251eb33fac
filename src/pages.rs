//! The two routed views.

use crate::components::{BannerPosition, FlashWord, MarqueeBanner, TypewriterLine, WaitlistPanel};
use crate::Route;
use gloo_timers::callback::Timeout;
use std::rc::Rc;
use third_spacer::config::{FADE_IN_DELAY_MS, FLASH_INTERVAL_MS, VIDEO_PLAYBACK_RATE};
use third_spacer::waitlist::share_intent_url;
use third_spacer::SiteConfig;
use web_sys::HtmlVideoElement;
use yew::prelude::*;
use yew_router::prelude::*;

const PAGE_CSS: &str = r#"
@keyframes fade-in {
  from { opacity: 0; transform: translateY(16px); }
  to { opacity: 1; transform: none; }
}
.fade-in { animation: fade-in 0.7s cubic-bezier(.4,0,.2,1) both; }
@keyframes blink {
  0%, 100% { opacity: 1; }
  50% { opacity: 0; }
}
.typewriter-cursor { display: inline-block; animation: blink 1s steps(1) infinite; }
.typewriter-text { white-space: pre; }
@keyframes marquee-loop {
  0% { transform: translateX(0); }
  100% { transform: translateX(-50%); }
}
.marquee-bar { position: absolute; left: 0; width: 100%; height: 2.2rem; z-index: 50;
  pointer-events: none; background: rgba(0,0,0,0.4); overflow: hidden; }
.marquee-top { top: 0; }
.marquee-bottom { bottom: 0; }
.marquee-track { position: relative; width: 100%; height: 100%; overflow: hidden; }
.marquee-strip { position: absolute; left: 0; top: 0; height: 100%; width: max-content;
  display: flex; align-items: center; }
.marquee-copy { white-space: nowrap; margin-right: 1em; color: #fff; text-transform: uppercase; }
.hero { opacity: 0; transition: opacity 1s; }
.hero.visible { opacity: 1; }
@keyframes flash {
  0% { opacity: 0; }
  15%, 85% { opacity: 1; }
  100% { opacity: 0; }
}
.flash-word { animation: flash 1.4s linear both; text-transform: uppercase; }
"#;

fn site_config() -> Rc<SiteConfig> {
    Rc::new(SiteConfig::default())
}

#[function_component(LandingPage)]
pub fn landing_page() -> Html {
    let config = use_context::<Rc<SiteConfig>>().unwrap_or_else(site_config);
    let fade_in = use_state(|| false);
    let video_ref = use_node_ref();

    {
        let fade_in = fade_in.clone();
        use_effect_with((), move |_| {
            let timeout = Timeout::new(FADE_IN_DELAY_MS, move || fade_in.set(true));
            move || drop(timeout)
        });
    }

    {
        let video_ref = video_ref.clone();
        use_effect_with((), move |_| {
            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                video.set_playback_rate(VIDEO_PLAYBACK_RATE);
            }
        });
    }

    let timing = config.typewriter_timing().unwrap_or_default();
    let share_url = share_intent_url(&config);

    html! {
        <div class="landing">
            <style>{ PAGE_CSS }</style>
            <MarqueeBanner
                text={config.top_marquee.clone()}
                speed_secs={config.marquee_speed_secs}
                position={BannerPosition::Top}
            />
            <div class="background">
                <video ref={video_ref} autoplay=true loop=true muted=true playsinline=true class="background-video">
                    <source src="/videos/000background.mp4" type="video/mp4" />
                    { "Your browser does not support the video tag." }
                </video>
            </div>
            <main class={classes!("hero", fade_in.then_some("visible"))}>
                <FlashWord words={config.flash_words.clone()} interval_ms={FLASH_INTERVAL_MS} />
                <TypewriterLine text={config.typewriter_text.clone()} {timing} />
                <WaitlistPanel
                    form_name={config.form_name.clone()}
                    endpoint={config.form_endpoint.clone()}
                    {share_url}
                />
            </main>
            <MarqueeBanner
                text={config.bottom_marquee.clone()}
                speed_secs={config.marquee_speed_secs}
                position={BannerPosition::Bottom}
            />
        </div>
    }
}

#[function_component(ProjectsPage)]
pub fn projects_page() -> Html {
    html! {
        <div class="projects">
            <div class="projects-title">{ "Projects coming soon." }</div>
            <Link<Route> to={Route::Home} classes="back-link">{ "Back to Home" }</Link<Route>>
        </div>
    }
}
