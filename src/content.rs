use thiserror::Error;
use url::Url;

/// Skill level in percent, saturating at 100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Proficiency(u8);

impl Proficiency {
    pub const fn saturating(percent: u8) -> Self {
        if percent > 100 {
            Self(100)
        } else {
            Self(percent)
        }
    }

    pub const fn percent(self) -> u8 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    pub level: Proficiency,
    pub icon: &'static str,
    pub color: Rgb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub image: &'static str,
    pub link: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SocialLink {
    pub name: &'static str,
    pub icon: &'static str,
    pub url: &'static str,
}

pub const OWNER: &str = "Arshad";

pub const SKILLS: &[Skill] = &[
    Skill {
        name: "JavaScript",
        level: Proficiency::saturating(95),
        icon: "⚡",
        color: Rgb(0xF7, 0xDF, 0x1E),
    },
    Skill {
        name: "React",
        level: Proficiency::saturating(90),
        icon: "⚛️",
        color: Rgb(0x61, 0xDA, 0xFB),
    },
    Skill {
        name: "Vue.js",
        level: Proficiency::saturating(85),
        icon: "🟢",
        color: Rgb(0x4F, 0xC0, 0x8D),
    },
    Skill {
        name: "GSAP",
        level: Proficiency::saturating(90),
        icon: "🎬",
        color: Rgb(0x88, 0xCE, 0x02),
    },
    Skill {
        name: "CSS/SCSS",
        level: Proficiency::saturating(95),
        icon: "🎨",
        color: Rgb(0x26, 0x4D, 0xE4),
    },
    Skill {
        name: "TypeScript",
        level: Proficiency::saturating(85),
        icon: "📘",
        color: Rgb(0x31, 0x78, 0xC6),
    },
];

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Project Nebula",
        description: "A real-time data visualization platform with interactive 3D graphs and AI-powered analytics.",
        tags: &["React", "Three.js", "TensorFlow.js", "WebGL"],
        image: "/images/projects/project1.jpg",
        link: "#",
    },
    Project {
        title: "EcoTrack",
        description: "Smart IoT dashboard for monitoring and optimizing energy consumption in real-time.",
        tags: &["Next.js", "IoT", "WebSockets", "Chart.js"],
        image: "/images/projects/project2.jpg",
        link: "#",
    },
    Project {
        title: "CryptoVault",
        description: "Secure cryptocurrency wallet with biometric authentication and real-time market analysis.",
        tags: &["React Native", "Blockchain", "Biometrics", "API"],
        image: "/images/projects/project3.jpg",
        link: "#",
    },
];

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        name: "GitHub",
        icon: "💻",
        url: "https://github.com/Arshaduzzaman3620",
    },
    SocialLink {
        name: "LinkedIn",
        icon: "🔗",
        url: "https://www.linkedin.com/in/arshaduzzaman-sm/",
    },
    SocialLink {
        name: "Twitter",
        icon: "🐦",
        url: "https://twitter.com/yourusername",
    },
    SocialLink {
        name: "Email",
        icon: "📧",
        url: "mailto:your.email@example.com",
    },
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("link `{url}` on {owner} is not a valid URL: {reason}")]
    InvalidUrl {
        owner: String,
        url: String,
        reason: String,
    },
    #[error("link `{url}` on {owner} uses unsupported scheme `{scheme}`")]
    UnsupportedScheme {
        owner: String,
        url: String,
        scheme: String,
    },
}

/// Accepts in-page fragments and absolute http(s) or mailto URLs.
pub fn check_link(owner: &str, raw: &str) -> Result<(), ContentError> {
    if raw.starts_with('#') {
        return Ok(());
    }

    let parsed = Url::parse(raw).map_err(|error| ContentError::InvalidUrl {
        owner: owner.to_string(),
        url: raw.to_string(),
        reason: error.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" | "mailto" => Ok(()),
        other => Err(ContentError::UnsupportedScheme {
            owner: owner.to_string(),
            url: raw.to_string(),
            scheme: other.to_string(),
        }),
    }
}

pub fn validate_links(projects: &[Project], socials: &[SocialLink]) -> Vec<ContentError> {
    let project_links = projects
        .iter()
        .map(|project| check_link(project.title, project.link));
    let social_links = socials.iter().map(|link| check_link(link.name, link.url));

    project_links
        .chain(social_links)
        .filter_map(Result::err)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proficiency_saturates() {
        assert_eq!(Proficiency::saturating(85).percent(), 85);
        assert_eq!(Proficiency::saturating(250).percent(), 100);
    }

    #[test]
    fn bundled_skills_are_in_range() {
        assert_eq!(SKILLS.len(), 6);
        assert!(SKILLS.iter().all(|skill| skill.level.percent() <= 100));
        assert_eq!(SKILLS[0].color.to_css(), "#f7df1e");
    }

    #[test]
    fn bundled_links_are_well_formed() {
        assert_eq!(validate_links(PROJECTS, SOCIAL_LINKS), Vec::new());
    }

    #[test]
    fn broken_links_are_reported() {
        let socials = [
            SocialLink {
                name: "Broken",
                icon: "",
                url: "not a url",
            },
            SocialLink {
                name: "Script",
                icon: "",
                url: "javascript:alert(1)",
            },
        ];

        let errors = validate_links(&[], &socials);
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ContentError::InvalidUrl { .. }));
        assert!(matches!(
            &errors[1],
            ContentError::UnsupportedScheme { scheme, .. } if scheme == "javascript"
        ));
    }
}
