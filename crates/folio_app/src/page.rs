// SPDX-License-Identifier: MIT OR Apache-2.0
//! Page structure.
//!
//! Builds the intro overlay and, once revealed, the landing, about and
//! contact sections into a [`Scene`]. Sections are stacked one viewport
//! height apart.

use crate::config::AssetSettings;
use crate::content::{
    ABOUT_HEADING, ABOUT_TEXT, CONTACTS, CONTACT_HEADING, GREETING, INTERNSHIP, MASK_TEXT,
    NAME_LINES, SCROLL_DOWN_LABEL, SKILLS, SKILLS_HEADING,
};
use folio_sequencer::{
    Bounds, Element, ElementId, ElementRegistry, Property, Scene, Value, Viewport,
};

/// DOM id of the contact section, the scroll-down destination
pub const CONTACT_ID: &str = "contact";

/// Elements the session keeps hold of after mounting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountedPage {
    /// Wrapper of all revealed content
    pub main: ElementId,
    /// About section container
    pub about: ElementId,
    /// About hero image
    pub hero: ElementId,
    /// About info panel
    pub panel: ElementId,
    /// Contact section
    pub contact: ElementId,
}

/// Build the full-screen intro overlay with its masked group
pub fn build_overlay(scene: &mut Scene, viewport: &Viewport, assets: &AssetSettings) -> ElementId {
    let overlay = scene.add(
        Element::new("div")
            .with_class("svg")
            .with_bounds(Bounds::new(0.0, 0.0, viewport.width, viewport.height)),
    );
    let svg = scene.add(
        Element::new("svg")
            .with_attr("viewBox", "0 0 800 600")
            .with_attr("preserveAspectRatio", "xMidYMid slice")
            .child_of(overlay),
    );
    let mask = scene.add(Element::new("mask").with_dom_id("viMask").child_of(svg));
    let group = scene.add(
        Element::new("g")
            .with_class("vi-mask-group")
            .with_attr("transform-origin", "50% 50%")
            .child_of(mask),
    );
    scene.add(
        Element::new("text")
            .with_attr("font-size", "250")
            .with_text(MASK_TEXT)
            .child_of(group),
    );
    scene.add(
        Element::new("image")
            .with_attr("href", assets.background.as_str())
            .with_attr("mask", "url(#viMask)")
            .child_of(svg),
    );

    tracing::debug!("Intro overlay built");
    overlay
}

/// Mount the revealed content. Elements of the about panel that take
/// part in the staggered reveal are registered in render order.
pub fn mount_content(
    scene: &mut Scene,
    viewport: &Viewport,
    assets: &AssetSettings,
    registry: &mut ElementRegistry,
) -> MountedPage {
    let (width, height) = (viewport.width, viewport.height);

    let main = scene.add(
        Element::new("div")
            .with_class("main")
            .with_value(Property::Rotate, Value::deg(-10.0))
            .with_value(Property::Scale, Value::number(1.7))
            .with_bounds(Bounds::new(0.0, 0.0, width, height * 3.0)),
    );

    build_landing(scene, main, width, height, assets);
    let (about, hero, panel) = build_about(scene, main, width, height, registry);
    let contact = build_contact(scene, main, width, height, assets);

    tracing::info!(
        "Content mounted ({} elements, {} registered for scroll reveal)",
        scene.len(),
        registry.len()
    );

    MountedPage {
        main,
        about,
        hero,
        panel,
        contact,
    }
}

fn build_landing(
    scene: &mut Scene,
    main: ElementId,
    width: f32,
    height: f32,
    assets: &AssetSettings,
) {
    let landing = scene.add(
        Element::new("div")
            .with_class("landing")
            .with_bounds(Bounds::new(0.0, 0.0, width, height))
            .child_of(main),
    );

    let navbar = scene.add(Element::new("div").with_class("navbar").child_of(landing));
    let lines = scene.add(Element::new("div").with_class("lines").child_of(navbar));
    for _ in 0..3 {
        scene.add(Element::new("div").with_class("line").child_of(lines));
    }

    let images = scene.add(
        Element::new("div")
            .with_class("imagesdiv")
            .with_bounds(Bounds::new(0.0, 0.0, width, height))
            .child_of(landing),
    );
    scene.add(
        Element::new("img")
            .with_class("sky")
            .with_attr("src", assets.sky.as_str())
            .with_value(Property::Scale, Value::number(1.5))
            .with_value(Property::Rotate, Value::deg(-20.0))
            .child_of(images),
    );
    scene.add(
        Element::new("img")
            .with_class("bg")
            .with_attr("src", assets.background.as_str())
            .with_value(Property::Scale, Value::number(1.8))
            .with_value(Property::Rotate, Value::deg(-3.0))
            .child_of(images),
    );

    let text = scene.add(
        Element::new("div")
            .with_class("text")
            .with_value(Property::Scale, Value::number(1.4))
            .with_value(Property::Rotate, Value::deg(-10.0))
            .child_of(images),
    );
    for line in NAME_LINES {
        scene.add(Element::new("h1").with_text(line).child_of(text));
    }

    scene.add(
        Element::new("img")
            .with_class("character")
            .with_attr("src", assets.character.as_str())
            .with_value(Property::X, Value::percent(50.0))
            .with_value(Property::Bottom, Value::px(0.0))
            .child_of(images),
    );

    let bar = scene.add(Element::new("div").with_class("btmbar").child_of(landing));
    scene.add(
        Element::new("div")
            .with_class("scroll-down")
            .with_text(SCROLL_DOWN_LABEL)
            .child_of(bar),
    );
}

fn build_about(
    scene: &mut Scene,
    main: ElementId,
    width: f32,
    height: f32,
    registry: &mut ElementRegistry,
) -> (ElementId, ElementId, ElementId) {
    let about = scene.add(
        Element::new("section")
            .with_class("about")
            .with_bounds(Bounds::new(0.0, height, width, height))
            .child_of(main),
    );
    let hero = scene.add(
        Element::new("div")
            .with_class("about-hero")
            .with_bounds(Bounds::new(width * 0.1, height * 1.1, width * 0.35, height * 0.9))
            .child_of(about),
    );
    let panel = scene.add(
        Element::new("div")
            .with_class("about-panel")
            .with_bounds(Bounds::new(width * 0.55, height, width * 0.37, height * 0.85))
            .child_of(about),
    );

    let mut registered = |scene: &mut Scene, element: Element| {
        let id = scene.add(element.child_of(panel));
        registry.add(id);
        id
    };

    registered(scene, Element::new("h1").with_text(GREETING));
    registered(scene, Element::new("h3").with_text(ABOUT_HEADING));
    registered(scene, Element::new("p").with_text(ABOUT_TEXT));
    registered(scene, Element::new("h3").with_text(SKILLS_HEADING));
    for skill in SKILLS {
        registered(
            scene,
            Element::new("div")
                .with_class("skill")
                .with_attr("icon", skill.icon)
                .with_text(skill.name),
        );
    }
    registered(scene, Element::new("p").with_text(INTERNSHIP));

    (about, hero, panel)
}

fn build_contact(
    scene: &mut Scene,
    main: ElementId,
    width: f32,
    height: f32,
    assets: &AssetSettings,
) -> ElementId {
    let contact = scene.add(
        Element::new("section")
            .with_dom_id(CONTACT_ID)
            .with_attr("background", assets.contact_background.as_str())
            .with_bounds(Bounds::new(0.0, height * 2.0, width, height))
            .child_of(main),
    );
    scene.add(Element::new("h1").with_text(CONTACT_HEADING).child_of(contact));
    for entry in CONTACTS {
        scene.add(
            Element::new("a")
                .with_class("contact-entry")
                .with_attr("href", entry.href)
                .with_attr("label", entry.label)
                .with_text(entry.value)
                .child_of(contact),
        );
    }
    contact
}
