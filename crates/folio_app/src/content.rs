// SPDX-License-Identifier: MIT OR Apache-2.0
//! Static page copy: name, about text, skills and contact entries.

/// Greeting that opens the about panel
pub const GREETING: &str = "HEY THERE!";

/// Name shown on the landing section, one entry per line
pub const NAME_LINES: [&str; 2] = ["Alex", "Morgan"];

/// Text drawn inside the intro mask
pub const MASK_TEXT: &str = "HI!";

/// Label of the scroll-down button
pub const SCROLL_DOWN_LABEL: &str = "Click To Down";

/// About panel heading
pub const ABOUT_HEADING: &str = "About Me:";

/// About panel paragraph
pub const ABOUT_TEXT: &str = "I build fast, accessible web interfaces and the \
small tools around them. Most days that means TypeScript on the front end, a \
bit of Python or Node behind it, and a lot of attention to how things move.";

/// Skills list heading
pub const SKILLS_HEADING: &str = "My Skills";

/// Internship line under the skills
pub const INTERNSHIP: &str = "Internship: Front-end developer, 6 months";

/// Contact section heading
pub const CONTACT_HEADING: &str = "Get In Touch";

/// One skill card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    /// Display name
    pub name: &'static str,
    /// Icon file
    pub icon: &'static str,
}

/// Skill cards, in display order
pub const SKILLS: [Skill; 13] = [
    Skill { name: "HTML", icon: "html.svg" },
    Skill { name: "CSS", icon: "css.svg" },
    Skill { name: "JavaScript", icon: "javascript.svg" },
    Skill { name: "TypeScript", icon: "typescript.svg" },
    Skill { name: "React", icon: "react.svg" },
    Skill { name: "Next.js", icon: "nextjs.svg" },
    Skill { name: "Tailwind CSS", icon: "tailwind.svg" },
    Skill { name: "GSAP", icon: "gsap.svg" },
    Skill { name: "Node.js", icon: "nodejs.svg" },
    Skill { name: "Express", icon: "express.svg" },
    Skill { name: "MongoDB", icon: "mongodb.svg" },
    Skill { name: "Python", icon: "python.svg" },
    Skill { name: "Git", icon: "git.svg" },
];

/// One contact entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEntry {
    /// Label
    pub label: &'static str,
    /// Shown value
    pub value: &'static str,
    /// Link target
    pub href: &'static str,
}

/// Contact entries, in display order
pub const CONTACTS: [ContactEntry; 4] = [
    ContactEntry {
        label: "Email",
        value: "hello@example.com",
        href: "mailto:hello@example.com",
    },
    ContactEntry {
        label: "Phone",
        value: "+00 000 000 0000",
        href: "tel:+000000000000",
    },
    ContactEntry {
        label: "LinkedIn",
        value: "linkedin.com/in/example",
        href: "https://www.linkedin.com/in/example",
    },
    ContactEntry {
        label: "GitHub",
        value: "github.com/example",
        href: "https://github.com/example",
    },
];
