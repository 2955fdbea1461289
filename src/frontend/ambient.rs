use yew::prelude::*;

use super::hooks::{use_ambient, use_motion};
use crate::ambient::LoopKind;
use crate::page::Section;

#[derive(Properties, PartialEq)]
pub struct AmbientBackdropProps {
    pub section: Section,
    /// Draws the section's portrait glow instead of its backdrop.
    #[prop_or_default]
    pub glow: bool,
}

fn loop_class(kind: LoopKind) -> &'static str {
    match kind {
        LoopKind::Blob => "ambient-blob",
        LoopKind::Particle => "ambient-particle",
        LoopKind::Floater => "ambient-floater",
        LoopKind::Bob => "scroll-hint",
        LoopKind::Glow => "portrait-glow",
    }
}

/// Decorative layer behind a section's content. Renders one element per
/// ambient loop; the hook animates them in the same order.
#[function_component(AmbientBackdrop)]
pub fn ambient_backdrop(props: &AmbientBackdropProps) -> Html {
    let motion = use_motion();
    let layer = use_node_ref();
    let plan = if props.glow {
        props.section.glow(motion.reduced_motion)
    } else {
        props.section.ambient(motion.reduced_motion)
    };
    let controller = use_ambient(props.section, plan, layer.clone());
    let controller = controller.borrow();

    html! {
        <div ref={layer} class={classes!("ambient", props.glow.then_some("glow-layer"))} aria-hidden="true">
            { for controller.loops().iter().map(|ambient| {
                let style = ambient
                    .placement
                    .map(|at| format!("left: {:.2}%; top: {:.2}%;", at.left, at.top));
                let glyph = if ambient.kind == LoopKind::Bob { "↓" } else { "" };

                html! { <div class={loop_class(ambient.kind)} style={style}>{glyph}</div> }
            }) }
        </div>
    }
}
