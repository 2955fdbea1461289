use std::cell::RefCell;
use std::rc::Rc;

use log::Level;
use serde_json::json;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::ambient::AmbientBackdrop;
use super::hooks::{use_motion, use_reveal, use_section_mounted, RevealScope};
use super::links::{SocialLinks, SocialStyle};
use super::timers::TaskPump;
use crate::clock;
use crate::contact::{ContactForm, FormField, Phase, SimulatedTransport};
use crate::content::SOCIAL_LINKS;
use crate::page::Section;
use crate::telemetry::log_event;

type SharedForm = Rc<RefCell<ContactForm<SimulatedTransport>>>;

/// Keeps one wake-up armed for the form's next due task until none remain.
fn drive_form(form: SharedForm, pump: Rc<TaskPump>, redraw: UseForceUpdateHandle) {
    let due = form.borrow().next_due();
    let next = Rc::clone(&pump);
    pump.arm(due, move || {
        let entered = form.borrow_mut().advance(clock::now());
        for phase in &entered {
            match phase {
                Phase::Sent => log_event(Level::Info, "contact_sent", json!({})),
                Phase::Failed(error) => log_event(
                    Level::Warn,
                    "contact_failed",
                    json!({ "error": error.to_string() }),
                ),
                Phase::Idle | Phase::Submitting => {}
            }
        }
        if !entered.is_empty() {
            redraw.force_update();
        }
        drive_form(form, next, redraw);
    });
}

fn field_input(form: SharedForm, redraw: UseForceUpdateHandle) -> Callback<InputEvent> {
    Callback::from(move |event: InputEvent| {
        let (name, value) = if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            (input.name(), input.value())
        } else if let Some(area) = event.target_dyn_into::<HtmlTextAreaElement>() {
            (area.name(), area.value())
        } else {
            return;
        };

        match name.parse::<FormField>() {
            Ok(field) => form.borrow_mut().update(field, value),
            Err(error) => {
                log::warn!("{error}");
                return;
            }
        }
        redraw.force_update();
    })
}

#[function_component(Contact)]
pub fn contact() -> Html {
    let motion = use_motion();
    let heading = use_node_ref();
    let body = use_node_ref();
    let form = use_mut_ref(|| ContactForm::new(motion.config.contact, SimulatedTransport));
    let pump = use_memo((), |_| TaskPump::default());
    let redraw = use_force_update();

    use_section_mounted(Section::Contact);
    use_reveal(Section::Contact, "heading", heading.clone(), RevealScope::Element);
    use_reveal(Section::Contact, "form", body.clone(), RevealScope::Children);

    {
        let form = Rc::clone(&form);
        let pump = Rc::clone(&pump);
        use_effect_with((), move |_| {
            move || {
                pump.cancel();
                let dropped = form.borrow_mut().dispose();
                if dropped > 0 {
                    log::debug!("contact form unmounted with {dropped} pending task(s)");
                }
            }
        });
    }

    let oninput = field_input(Rc::clone(&form), redraw.clone());

    let onsubmit = {
        let form = Rc::clone(&form);
        let pump = Rc::clone(&pump);
        let redraw = redraw.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let submitted = form.borrow_mut().submit(clock::now());
            match submitted {
                Ok(()) => drive_form(Rc::clone(&form), Rc::clone(&pump), redraw.clone()),
                Err(error) => log_event(
                    Level::Info,
                    "contact_submit_rejected",
                    json!({ "reason": error.to_string() }),
                ),
            }
            redraw.force_update();
        })
    };

    let state = form.borrow();
    let fields = state.fields();
    let notice = match state.phase() {
        Phase::Sent => html! {
            <p class="form-notice is-success" role="status">{"Message sent successfully!"}</p>
        },
        Phase::Failed(error) => html! {
            <p class="form-notice is-error" role="alert">{format!("{error}. Please try again.")}</p>
        },
        Phase::Idle | Phase::Submitting => html! {},
    };
    let validation = state.last_error().map(|error| {
        html! { <p class="form-notice is-error" role="alert">{error.to_string()}</p> }
    });

    html! {
        <section id={Section::Contact.id()} aria-label={Section::Contact.title()} class="section contact">
            <AmbientBackdrop section={Section::Contact} />
            <div class="section-inner">
                <div class="divider" />
                <h2 ref={heading} class="section-title">
                    {"Get in "}<span class="accent">{"Touch"}</span>
                </h2>
                <div ref={body} class="contact-body">
                    <p class="contact-tagline">{"Let's build something together."}</p>
                    <form class="contact-form" onsubmit={onsubmit}>
                        <input
                            type="text"
                            name={FormField::Name.as_str()}
                            placeholder="Your name"
                            value={fields.name.clone()}
                            oninput={oninput.clone()}
                        />
                        <input
                            type="email"
                            name={FormField::Email.as_str()}
                            placeholder="Your email"
                            required=true
                            value={fields.email.clone()}
                            oninput={oninput.clone()}
                        />
                        <textarea
                            name={FormField::Message.as_str()}
                            rows="4"
                            placeholder="Your message"
                            required=true
                            value={fields.message.clone()}
                            oninput={oninput}
                        />
                        <button type="submit" class="submit" disabled={state.is_locked()}>
                            <span>{state.submit_label()}</span>
                            <span aria-hidden="true">{"➤"}</span>
                        </button>
                        {validation}
                        {notice}
                    </form>
                    <div class="contact-social">
                        <h3>{"Connect with me"}</h3>
                        <SocialLinks links={SOCIAL_LINKS} style={SocialStyle::Labelled} />
                    </div>
                </div>
            </div>
        </section>
    }
}
