mod ambient;
mod contact;
mod cursor;
mod dom;
mod hooks;
mod links;
mod sections;
mod timers;

use std::rc::Rc;

use log::Level;
use serde_json::json;
use web_sys::window;
use yew::prelude::*;

use self::contact::Contact;
use self::cursor::CustomCursor;
use self::hooks::MotionContext;
use self::sections::{About, Footer, Hero, Projects, Skills};
use crate::config::{MotionConfig, CONFIG_ELEMENT_ID};
use crate::content::{validate_links, PROJECTS, SOCIAL_LINKS};
use crate::page::Section;
use crate::telemetry::log_event;

fn render_section(section: Section) -> Html {
    match section {
        Section::Hero => html! { <Hero key={section.id()} /> },
        Section::About => html! { <About key={section.id()} /> },
        Section::Projects => html! { <Projects key={section.id()} /> },
        Section::Skills => html! { <Skills key={section.id()} /> },
        Section::Contact => html! { <Contact key={section.id()} /> },
        Section::Footer => html! { <Footer key={section.id()} /> },
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    motion: MotionContext,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    use_effect_with((), |_| {
        dom::enable_smooth_scroll();
        || ()
    });

    html! {
        <ContextProvider<MotionContext> context={props.motion.clone()}>
            <CustomCursor />
            <main class="page">
                { for Section::ALL.into_iter().map(render_section) }
            </main>
        </ContextProvider<MotionContext>>
    }
}

/// Reads the embedded config, falling back to defaults when it is absent or
/// malformed. The error is returned so it can be logged once logging is up.
fn load_config() -> (MotionConfig, Option<String>) {
    let Some(raw) = dom::element_text(CONFIG_ELEMENT_ID) else {
        return (MotionConfig::default(), None);
    };

    match MotionConfig::from_json(&raw) {
        Ok(config) => (config, None),
        Err(error) => (MotionConfig::default(), Some(error.to_string())),
    }
}

pub fn run() {
    console_error_panic_hook::set_once();

    let (config, load_error) = load_config();
    let _ = console_log::init_with_level(config.log_level);

    if let Some(error) = load_error {
        log_event(Level::Warn, "config_rejected", json!({ "error": error }));
    }
    if !config.rejected.is_empty() {
        log_event(
            Level::Warn,
            "config_rejected",
            json!({ "keys": config.rejected }),
        );
    }

    let reduced_motion = config
        .reduced_motion
        .unwrap_or_else(dom::prefers_reduced_motion);
    log_event(
        Level::Info,
        "config_loaded",
        json!({
            "reduced_motion": reduced_motion,
            "frame_interval_ms": config.frame_interval_ms(),
            "cursor_trail_ms": config.cursor.trail_delay.as_millis() as u64,
            "log_level": config.log_level.as_str(),
        }),
    );

    for error in validate_links(PROJECTS, SOCIAL_LINKS) {
        log_event(
            Level::Warn,
            "content_invalid",
            json!({ "error": error.to_string() }),
        );
    }

    let motion = MotionContext {
        config: Rc::new(config),
        reduced_motion,
    };

    yew::Renderer::<App>::with_root_and_props(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
        AppProps { motion },
    )
    .render();
}
