//! Sidebar navigation derived from the active project's type.

use serde::Serialize;

use crate::models::ProjectType;

pub const PORTAL_ICON: &str = "portal";

const STROKE_ICONS: [&str; 4] = ["subscriptions", "portal", "logs", "meta"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: String,
    pub icon: String,
    pub route: String,
}

impl NavItem {
    pub fn new(name: &str, icon: &str, route: &str) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            route: route.to_string(),
        }
    }

    pub fn portal_links() -> Self {
        Self::new("Portal Links", PORTAL_ICON, "/portal-links")
    }

    /// Icons drawn with strokes rather than fills.
    pub fn is_stroke_icon(&self) -> bool {
        is_stroke_icon(&self.icon)
    }
}

/// Ordered sidebar entries. Mutated in place when the project type changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationMenu {
    items: Vec<NavItem>,
}

impl NavigationMenu {
    pub fn new(items: Vec<NavItem>) -> Self {
        Self { items }
    }

    /// Primary sidebar, before any project is known.
    pub fn primary() -> Self {
        Self::new(vec![
            NavItem::new("Event Deliveries", "events", "/events"),
            NavItem::new("Sources", "sources", "/sources"),
            NavItem::new("Subscriptions", "subscriptions", "/subscriptions"),
            NavItem::new("Endpoints", "endpoint", "/endpoints"),
            NavItem::new("Events Log", "logs", "/events-log"),
            NavItem::new("Meta Events", "meta", "/meta-events"),
        ])
    }

    pub fn secondary() -> Self {
        Self::new(vec![
            NavItem::new("Events Log", "logs", "/events-log"),
            NavItem::new("Meta Events", "meta", "/meta-events"),
        ])
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_portal_links(&self) -> bool {
        self.items.last().map(|i| i.icon == PORTAL_ICON).unwrap_or(false)
    }

    /// Add or remove the trailing "Portal Links" entry for `project_type`.
    ///
    /// Only ever touches the last position, and only when the trailing
    /// entry says the menu is out of step, so repeated calls are no-ops.
    /// Returns whether the menu changed.
    pub fn apply_project_type(&mut self, project_type: ProjectType) -> bool {
        match project_type {
            ProjectType::Outgoing if !self.has_portal_links() => {
                self.items.push(NavItem::portal_links());
                true
            }
            ProjectType::Incoming if self.has_portal_links() => {
                self.items.pop();
                true
            }
            _ => false,
        }
    }
}

impl Default for NavigationMenu {
    fn default() -> Self {
        Self::primary()
    }
}

pub fn is_stroke_icon(icon: &str) -> bool {
    STROKE_ICONS.iter().any(|stroke| icon.contains(stroke))
}

/// Up to two initials for a project avatar, e.g. "Payments Hub" -> "PH".
pub fn initials(text: &str) -> Option<String> {
    let letters: String = text
        .split(' ')
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect();
    if letters.is_empty() {
        None
    } else {
        Some(letters)
    }
}
