use yew::prelude::*;

use crate::content::SocialLink;

#[derive(Properties, PartialEq)]
pub struct ExternalLinkProps {
    pub href: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(ExternalLink)]
pub fn external_link(props: &ExternalLinkProps) -> Html {
    html! {
        <a
            class={classes!("link", props.class.clone())}
            href={props.href.clone()}
            target="_blank"
            rel="noopener noreferrer"
        >
            {props.children.clone()}
            <span class="sr-only">{" (opens in a new tab)"}</span>
        </a>
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SocialStyle {
    /// Icon and name side by side.
    Labelled,
    /// Icon only; the name is screen-reader text.
    Compact,
}

#[derive(Properties, PartialEq)]
pub struct SocialLinksProps {
    pub links: &'static [SocialLink],
    pub style: SocialStyle,
}

#[function_component(SocialLinks)]
pub fn social_links(props: &SocialLinksProps) -> Html {
    let class = match props.style {
        SocialStyle::Labelled => "social-grid",
        SocialStyle::Compact => "social-row",
    };

    html! {
        <div class={class}>
            { for props.links.iter().map(|link| html! {
                <ExternalLink href={link.url} class="social-link">
                    <span class="social-icon" aria-hidden="true">{link.icon}</span>
                    {
                        match props.style {
                            SocialStyle::Labelled => html! { <span class="social-name">{link.name}</span> },
                            SocialStyle::Compact => html! { <span class="sr-only">{link.name}</span> },
                        }
                    }
                </ExternalLink>
            }) }
        </div>
    }
}
