use yew::prelude::*;

use super::ambient::AmbientBackdrop;
use super::hooks::{
    use_motion, use_parallax, use_reveal, use_section_mounted, use_skill_bar, RevealScope,
};
use super::links::{ExternalLink, SocialLinks, SocialStyle};
use crate::content::{Project, Skill, OWNER, PROJECTS, SKILLS, SOCIAL_LINKS};
use crate::page::Section;

const HEADLINE: [&str; 3] = ["Hi,", "I'm", "Arshad."];

#[function_component(Hero)]
pub fn hero() -> Html {
    let section = use_node_ref();
    let headline = use_node_ref();
    let subtitle = use_node_ref();
    let underline = use_node_ref();

    use_section_mounted(Section::Hero);
    use_parallax(Section::Hero, section.clone());
    use_reveal(Section::Hero, "headline", headline.clone(), RevealScope::Children);
    use_reveal(Section::Hero, "subtitle", subtitle.clone(), RevealScope::Element);
    use_reveal(Section::Hero, "underline", underline.clone(), RevealScope::Element);

    html! {
        <section ref={section} id={Section::Hero.id()} aria-label={Section::Hero.title()} class="section hero">
            <div class="hero-overlay" />
            <AmbientBackdrop section={Section::Hero} />
            <div class="hero-content">
                <h1 ref={headline} class="headline">
                    { for HEADLINE.iter().map(|word| html! { <span class="word gradient-text">{*word}</span> }) }
                </h1>
                <div class="subtitle-wrap">
                    <p ref={subtitle} class="subtitle gradient-text">{"Welcome to my portfolio"}</p>
                    <div ref={underline} class="underline" />
                </div>
            </div>
        </section>
    }
}

#[function_component(About)]
pub fn about() -> Html {
    let motion = use_motion();
    let text = use_node_ref();
    let portrait = use_node_ref();

    use_section_mounted(Section::About);
    use_reveal(Section::About, "text", text.clone(), RevealScope::Children);
    use_reveal(Section::About, "portrait", portrait.clone(), RevealScope::Element);

    html! {
        <section id={Section::About.id()} aria-label={Section::About.title()} class="section about">
            <AmbientBackdrop section={Section::About} />
            <div class="section-inner about-layout">
                <div ref={portrait} class="portrait">
                    if motion.reduced_motion {
                        <div class="portrait-glow" />
                    } else {
                        <AmbientBackdrop section={Section::About} glow=true />
                    }
                    <img src="/images/profile.jpg" alt={OWNER} />
                </div>
                <div ref={text} class="about-text">
                    <h2 class="section-title">{"About "}<span class="accent">{"Me"}</span></h2>
                    <p>
                        {"Hi, I'm "}<span class="accent strong">{OWNER}</span>{", a "}
                        <span class="accent underline-hover">{"Backend Developer"}</span>
                        {" based in Tokyo, Japan. I specialize in building robust, scalable server-side applications that power modern web experiences."}
                    </p>
                    <p>
                        {"My expertise lies in "}
                        <span class="accent underline-hover">{"Django"}</span>{", "}
                        <span class="accent underline-hover">{"API development"}</span>{", and "}
                        <span class="accent underline-hover">{"SQL"}</span>
                        {" database design. I'm passionate about creating efficient backend systems that ensure performance, security, and maintainability."}
                    </p>
                    <SocialLinks links={&SOCIAL_LINKS[..2]} style={SocialStyle::Compact} />
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    project: Project,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let project = &props.project;

    html! {
        <article class="card project-card">
            <div class="project-media">
                <div
                    class="project-image"
                    style={format!("background-image: url({})", project.image)}
                />
                <div class="project-overlay">
                    <ExternalLink href={project.link} class="project-link">{"View Project"}</ExternalLink>
                </div>
            </div>
            <h3>{project.title}</h3>
            <p>{project.description}</p>
            <ul class="tags">
                { for project.tags.iter().map(|tag| html! { <li class="tag">{*tag}</li> }) }
            </ul>
        </article>
    }
}

#[function_component(Projects)]
pub fn projects() -> Html {
    let heading = use_node_ref();
    let cards = use_node_ref();

    use_section_mounted(Section::Projects);
    use_reveal(Section::Projects, "heading", heading.clone(), RevealScope::Element);
    use_reveal(Section::Projects, "cards", cards.clone(), RevealScope::Children);

    html! {
        <section id={Section::Projects.id()} aria-label={Section::Projects.title()} class="section projects">
            <h2 ref={heading} class="section-title">
                {"Featured "}<span class="accent">{"Projects"}</span>
            </h2>
            <div ref={cards} class="card-grid">
                { for PROJECTS.iter().map(|project| html! {
                    <ProjectCard key={project.title} project={*project} />
                }) }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct SkillCardProps {
    skill: Skill,
    index: usize,
}

#[function_component(SkillCard)]
fn skill_card(props: &SkillCardProps) -> Html {
    let track = use_node_ref();
    let fill = use_node_ref();
    let skill = props.skill;

    use_skill_bar(skill, props.index, track.clone(), fill.clone());

    html! {
        <article class="card skill-card">
            <div class="skill-header">
                <span class="skill-icon" aria-hidden="true">{skill.icon}</span>
                <h3>{skill.name}</h3>
                <span class="skill-level">{format!("{}%", skill.level.percent())}</span>
            </div>
            <div
                ref={track}
                class="skill-track"
                role="progressbar"
                aria-label={skill.name}
                aria-valuemin="0"
                aria-valuemax="100"
                aria-valuenow={skill.level.percent().to_string()}
            >
                <div
                    ref={fill}
                    class="skill-fill"
                    style={format!("width: 0%; background-color: {};", skill.color.to_css())}
                />
            </div>
        </article>
    }
}

#[function_component(Skills)]
pub fn skills() -> Html {
    let heading = use_node_ref();
    let cards = use_node_ref();

    use_section_mounted(Section::Skills);
    use_reveal(Section::Skills, "heading", heading.clone(), RevealScope::Element);
    use_reveal(Section::Skills, "cards", cards.clone(), RevealScope::Children);

    html! {
        <section id={Section::Skills.id()} aria-label={Section::Skills.title()} class="section skills">
            <h2 ref={heading} class="section-title">
                {"My "}<span class="accent">{"Skills"}</span>
            </h2>
            <div ref={cards} class="card-grid two-up">
                { for SKILLS.iter().enumerate().map(|(index, skill)| html! {
                    <SkillCard key={skill.name} skill={*skill} index={index} />
                }) }
            </div>
        </section>
    }
}

#[function_component(Footer)]
pub fn footer() -> Html {
    let content = use_node_ref();
    let year = js_sys::Date::new_0().get_full_year();

    use_section_mounted(Section::Footer);
    use_reveal(Section::Footer, "content", content.clone(), RevealScope::Element);

    html! {
        <footer id={Section::Footer.id()} aria-label={Section::Footer.title()} class="section footer">
            <div ref={content} class="footer-content">
                <SocialLinks links={SOCIAL_LINKS} style={SocialStyle::Compact} />
                <p class="copyright">{format!("© {year} {OWNER}. All rights reserved.")}</p>
                <p class="built-with">{"Built with Rust, Yew and WebAssembly"}</p>
            </div>
        </footer>
    }
}
