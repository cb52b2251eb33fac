//! Yew view components for the landing page.
//!
//! Each component renders state computed by a hook in `hooks.rs`; none of
//! them own timers directly.

use crate::hooks::{use_flash_word, use_seamless_marquee, use_typewriter, use_waitlist};
use crate::intake::NetlifyIntake;
use std::rc::Rc;
use third_spacer::config::EMAIL_PLACEHOLDER;
use third_spacer::{FormIntake, MarqueeSpec, Stage, TypewriterTiming};
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq)]
pub enum BannerPosition {
    Top,
    Bottom,
}

impl BannerPosition {
    fn class(self) -> &'static str {
        match self {
            BannerPosition::Top => "marquee-bar marquee-top",
            BannerPosition::Bottom => "marquee-bar marquee-bottom",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct MarqueeBannerProps {
    pub text: AttrValue,
    pub speed_secs: f64,
    pub position: BannerPosition,
}

/// A looping text strip. The first copy is the one measured.
#[function_component(MarqueeBanner)]
pub fn marquee_banner(props: &MarqueeBannerProps) -> Html {
    let marquee = use_seamless_marquee(MarqueeSpec::new(props.text.to_string(), props.speed_secs));
    let strip_style = format!("animation: {};", marquee.layout.animation_css("marquee-loop"));

    html! {
        <div class={props.position.class()}>
            <div ref={marquee.track_ref.clone()} class="marquee-track">
                <div class="marquee-strip" style={strip_style}>
                    { (0..marquee.layout.repeat_count).map(|i| {
                        let node_ref = if i == 0 { marquee.content_ref.clone() } else { NodeRef::default() };
                        html! {
                            <span key={i} ref={node_ref} class="marquee-copy">{ props.text.clone() }</span>
                        }
                    }).collect::<Html>() }
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TypewriterLineProps {
    pub text: AttrValue,
    pub timing: TypewriterTiming,
}

#[function_component(TypewriterLine)]
pub fn typewriter_line(props: &TypewriterLineProps) -> Html {
    let typed = use_typewriter(props.text.clone(), props.timing);

    html! {
        <div class="typewriter">
            <span class="typewriter-text">{ typed }</span>
            <span class="typewriter-cursor">{ "|" }</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FlashWordProps {
    pub words: Vec<String>,
    pub interval_ms: u32,
}

#[function_component(FlashWord)]
pub fn flash_word(props: &FlashWordProps) -> Html {
    let word = use_flash_word(props.words.clone(), props.interval_ms);

    match word {
        // Keyed on the word so the flash animation restarts on every swap.
        Some(word) => html! {
            <div class="flash-word" key={word.clone()}>{ word }</div>
        },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct WaitlistPanelProps {
    pub form_name: AttrValue,
    pub endpoint: AttrValue,
    pub share_url: AttrValue,
}

/// Call-to-action, email form, then confirmation.
#[function_component(WaitlistPanel)]
pub fn waitlist_panel(props: &WaitlistPanelProps) -> Html {
    let intake: Rc<dyn FormIntake> = Rc::new(NetlifyIntake::new(props.endpoint.to_string()));
    let waitlist = use_waitlist(props.form_name.clone(), intake);

    match waitlist.stage {
        Stage::Idle => html! {
            <button class="cta-button" onclick={waitlist.on_open}>
                { "Join the Waitlist" }
            </button>
        },
        Stage::CollectingEmail => html! {
            <div class="waitlist-form-wrap fade-in">
                <form name={props.form_name.clone()} class="waitlist-form" onsubmit={waitlist.on_submit}>
                    <input type="hidden" name="form-name" value={props.form_name.clone()} />
                    <input
                        type="email"
                        name="email"
                        class="email-input"
                        placeholder={EMAIL_PLACEHOLDER}
                        value={waitlist.email}
                        oninput={waitlist.on_input}
                        readonly={waitlist.pending}
                        autofocus=true
                        required=true
                    />
                    <button type="submit" class="submit-button" disabled={waitlist.pending}>
                        { if waitlist.pending { "SENDING…" } else { "I'M IN" } }
                    </button>
                </form>
                if let Some(error) = waitlist.error {
                    <p class="form-error">{ error }</p>
                }
            </div>
        },
        Stage::Submitted => html! {
            <div class="waitlist-done fade-in">
                <p class="confirmation">{ "You're on the list. See you at the drop." }</p>
                <a class="share-link" href={props.share_url.clone()} target="_blank" rel="noopener noreferrer">
                    { "Tell a friend" }
                </a>
            </div>
        },
    }
}
