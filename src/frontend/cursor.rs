use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};
use yew::prelude::*;

use super::dom::{self, WindowListener};
use super::hooks::use_motion;
use super::timers::TaskPump;
use crate::clock;
use crate::cursor::{CursorTracker, Point};

fn pump_trail(tracker: Rc<RefCell<CursorTracker>>, pump: Rc<TaskPump>, dot: HtmlElement) {
    let due = tracker.borrow().next_due();
    let next = Rc::clone(&pump);
    pump.arm(due, move || {
        let moved = tracker.borrow_mut().advance(clock::now());
        if moved {
            let transform = tracker.borrow().positions().dot_transform();
            dom::set_style(&dot, "transform", &transform);
        }
        pump_trail(tracker, next, dot);
    });
}

#[function_component(CustomCursor)]
pub fn custom_cursor() -> Html {
    let motion = use_motion();
    let ring = use_node_ref();
    let dot = use_node_ref();

    {
        let ring = ring.clone();
        let dot = dot.clone();
        use_effect_with((), move |_| {
            let tracker = Rc::new(RefCell::new(CursorTracker::new(motion.config.cursor)));
            let pump = Rc::new(TaskPump::default());

            let listener = ring
                .cast::<HtmlElement>()
                .zip(dot.cast::<HtmlElement>())
                .and_then(|(ring, dot)| {
                    let tracker = Rc::clone(&tracker);
                    let pump = Rc::clone(&pump);
                    WindowListener::new("mousemove", move |event| {
                        let Some(event) = event.dyn_ref::<MouseEvent>() else {
                            return;
                        };
                        let point = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
                        tracker.borrow_mut().pointer_moved(clock::now(), point);

                        let transform = tracker.borrow().positions().ring_transform();
                        dom::set_style(&ring, "transform", &transform);
                        pump_trail(Rc::clone(&tracker), Rc::clone(&pump), dot.clone());
                    })
                });

            move || {
                drop(listener);
                pump.cancel();
                tracker.borrow_mut().dispose();
            }
        });
    }

    html! {
        <div class="custom-cursor" aria-hidden="true">
            <div ref={ring} class="cursor-ring" />
            <div ref={dot} class="cursor-dot" />
        </div>
    }
}
