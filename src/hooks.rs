//! Hooks that own the page's timers, DOM measurements and signup state.
//!
//! Every timer lives in an effect and is returned from its destructor, so
//! re-renders and unmounts cancel anything still scheduled.

use gloo_timers::callback::{Interval, Timeout};
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::Rc;
use third_spacer::config::{MAX_MEASURE_RETRIES, MEASURE_RETRY_MS, RESIZE_DEBOUNCE_MS};
use third_spacer::waitlist::IntakeError;
use third_spacer::{
    FlashWords, FormIntake, MarqueeEngine, MarqueeLayout, MarqueeSpec, Stage, Typewriter,
    TypewriterTiming, WaitlistFlow, WidthProbe,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement};
use yew::prelude::*;

// ──────────────────────────────────────────────────────────────────────────────
// Marquee

/// Measures the two elements a banner registers through its node refs.
struct NodeProbe<'a> {
    track: &'a NodeRef,
    content: &'a NodeRef,
}

fn offset_width(node: &NodeRef) -> Option<f64> {
    node.cast::<HtmlElement>().map(|el| el.offset_width() as f64)
}

impl WidthProbe for NodeProbe<'_> {
    fn track_width(&self) -> Option<f64> {
        offset_width(self.track)
    }

    fn content_width(&self) -> Option<f64> {
        offset_width(self.content)
    }
}

/// Bumped whenever the banner should be measured again.
#[derive(PartialEq)]
struct MeasurePass(u32);

impl Reducible for MeasurePass {
    type Action = ();

    fn reduce(self: Rc<Self>, _: ()) -> Rc<Self> {
        Rc::new(MeasurePass(self.0.wrapping_add(1)))
    }
}

pub struct MarqueeHandle {
    pub track_ref: NodeRef,
    pub content_ref: NodeRef,
    pub layout: MarqueeLayout,
}

#[hook]
pub fn use_seamless_marquee(spec: MarqueeSpec) -> MarqueeHandle {
    let track_ref = use_node_ref();
    let content_ref = use_node_ref();
    let engine = use_mut_ref(|| MarqueeEngine::new(spec.clone()));
    let layout = use_state_eq(|| engine.borrow().layout());
    let pass = use_reducer(|| MeasurePass(0));
    let retries = use_mut_ref(|| 0u32);

    // Measure on mount, on spec change, and on every pass bump.
    {
        let track_ref = track_ref.clone();
        let content_ref = content_ref.clone();
        let layout = layout.clone();
        let retries = retries.clone();
        let dispatcher = pass.dispatcher();
        use_effect_with((spec, pass.0), move |(spec, _)| {
            let (result, current) = {
                let mut engine = engine.borrow_mut();
                engine.set_spec(spec.clone());
                let probe = NodeProbe {
                    track: &track_ref,
                    content: &content_ref,
                };
                (engine.remeasure(&probe), engine.layout())
            };
            layout.set(current);

            let retry = match result {
                Ok(_) => {
                    *retries.borrow_mut() = 0;
                    None
                }
                Err(err) => {
                    let attempt = {
                        let mut retries = retries.borrow_mut();
                        *retries += 1;
                        *retries
                    };
                    if attempt <= MAX_MEASURE_RETRIES {
                        debug!("{}; retrying in {}ms", err, MEASURE_RETRY_MS);
                        Some(Timeout::new(MEASURE_RETRY_MS, move || dispatcher.dispatch(())))
                    } else {
                        warn!(
                            "{}; keeping {} copies until the next resize",
                            err, current.repeat_count
                        );
                        None
                    }
                }
            };
            move || drop(retry)
        });
    }

    // Debounced re-measure on window resize.
    {
        let dispatcher = pass.dispatcher();
        let retries = retries.clone();
        use_effect_with((), move |_| {
            let pending: RefCell<Option<Timeout>> = RefCell::new(None);
            let on_resize = Closure::<dyn Fn()>::new(move || {
                let dispatcher = dispatcher.clone();
                let retries = retries.clone();
                // Replacing the handle cancels the previous pending measure.
                pending.borrow_mut().replace(Timeout::new(RESIZE_DEBOUNCE_MS, move || {
                    *retries.borrow_mut() = 0;
                    dispatcher.dispatch(());
                }));
            });
            let window = gloo_utils::window();
            let registered = window
                .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
                .is_ok();
            if !registered {
                warn!("Could not listen for resize; marquees will not re-measure");
            }
            move || {
                if registered {
                    let _ = window.remove_event_listener_with_callback(
                        "resize",
                        on_resize.as_ref().unchecked_ref(),
                    );
                }
                drop(on_resize);
            }
        });
    }

    MarqueeHandle {
        track_ref,
        content_ref,
        layout: *layout,
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Typewriter

/// Returns the currently visible prefix of `text`.
#[hook]
pub fn use_typewriter(text: AttrValue, timing: TypewriterTiming) -> String {
    let machine = use_state(|| Typewriter::new(text.to_string(), timing));

    // Restart from empty when the text or timing changes.
    {
        let machine = machine.clone();
        use_effect_with((text, timing), move |(text, timing)| {
            if machine.text() != text.as_str() || machine.timing() != *timing {
                machine.set(Typewriter::new(text.to_string(), *timing));
            }
        });
    }

    // One owned timeout per state; the next is only scheduled once this
    // tick's state has rendered.
    {
        let handle = machine.clone();
        use_effect_with((*machine).clone(), move |current| {
            let mut next = current.clone();
            let timeout = Timeout::new(current.next_delay_ms(), move || {
                next.tick();
                handle.set(next);
            });
            move || drop(timeout)
        });
    }

    machine.rendered().to_string()
}

// ──────────────────────────────────────────────────────────────────────────────
// Flash word

enum FlashAction {
    Advance,
    Reset(FlashWords),
}

struct FlashStore(FlashWords);

impl Reducible for FlashStore {
    type Action = FlashAction;

    fn reduce(self: Rc<Self>, action: FlashAction) -> Rc<Self> {
        match action {
            FlashAction::Advance => {
                let mut words = self.0.clone();
                words.advance();
                Rc::new(FlashStore(words))
            }
            FlashAction::Reset(words) => Rc::new(FlashStore(words)),
        }
    }
}

#[hook]
pub fn use_flash_word(words: Vec<String>, interval_ms: u32) -> Option<String> {
    let store = use_reducer(|| FlashStore(FlashWords::new(words.clone())));

    {
        let dispatcher = store.dispatcher();
        use_effect_with((words, interval_ms), move |(words, interval_ms)| {
            dispatcher.dispatch(FlashAction::Reset(FlashWords::new(words.clone())));
            let interval = (words.len() > 1).then(|| {
                Interval::new(*interval_ms, move || dispatcher.dispatch(FlashAction::Advance))
            });
            move || drop(interval)
        });
    }

    store.0.current().map(str::to_string)
}

// ──────────────────────────────────────────────────────────────────────────────
// Waitlist

enum WaitlistAction {
    Open,
    Edit(String),
    Submit,
    Settle {
        attempt: u32,
        outcome: Result<(), IntakeError>,
    },
}

struct WaitlistStore(WaitlistFlow);

impl Reducible for WaitlistStore {
    type Action = WaitlistAction;

    fn reduce(self: Rc<Self>, action: WaitlistAction) -> Rc<Self> {
        let mut flow = self.0.clone();
        match action {
            WaitlistAction::Open => flow.open(),
            WaitlistAction::Edit(email) => {
                flow.set_email(email);
            }
            WaitlistAction::Submit => {
                if let Err(err) = flow.begin_submit() {
                    debug!("Waitlist submit ignored: {}", err);
                }
            }
            WaitlistAction::Settle { attempt, outcome } => {
                flow.settle(attempt, outcome);
            }
        }
        Rc::new(WaitlistStore(flow))
    }
}

/// State and callbacks for the signup panel.
pub struct WaitlistHandle {
    pub stage: Stage,
    pub email: String,
    pub pending: bool,
    pub error: Option<String>,
    pub on_open: Callback<MouseEvent>,
    pub on_input: Callback<InputEvent>,
    pub on_submit: Callback<SubmitEvent>,
}

#[hook]
pub fn use_waitlist(form_name: AttrValue, intake: Rc<dyn FormIntake>) -> WaitlistHandle {
    let store = use_reducer(|| WaitlistStore(WaitlistFlow::new(form_name.to_string())));

    // Hand each newly queued submission to the intake exactly once.
    {
        let dispatcher = store.dispatcher();
        use_effect_with(store.0.pending().cloned(), move |pending| {
            if let Some(submission) = pending.clone() {
                let attempt = submission.attempt;
                debug!("Sending waitlist attempt {}", attempt);
                intake.send(
                    submission,
                    Box::new(move |outcome| {
                        dispatcher.dispatch(WaitlistAction::Settle { attempt, outcome })
                    }),
                );
            }
        });
    }

    let on_open = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(WaitlistAction::Open))
    };

    let on_input = {
        let dispatcher = store.dispatcher();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatcher.dispatch(WaitlistAction::Edit(input.value()));
        })
    };

    let on_submit = {
        let dispatcher = store.dispatcher();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            dispatcher.dispatch(WaitlistAction::Submit);
        })
    };

    WaitlistHandle {
        stage: store.0.stage(),
        email: store.0.email().to_string(),
        pending: store.0.is_pending(),
        error: store.0.last_error().map(str::to_string),
        on_open,
        on_input,
        on_submit,
    }
}
