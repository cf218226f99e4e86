/// Content script: watches the host chat page, injects pin controls into
/// chat context menus, and maintains a synthetic "Pinned" sidebar section

mod icons;
mod inject;
mod observe;
mod render;

pub use observe::start;

use web_sys::Element;

use crate::labels::Labels;

// DOM contract with the host page. None of these nodes are ours; the
// selectors mirror the structure the host currently renders.
pub(crate) const HISTORY_CONTAINER_ID: &str = "history";
pub(crate) const POPPER_MARKER_ATTR: &str = "data-radix-popper-content-wrapper";
pub(crate) const SECTION_TEMPLATE_SELECTOR: &str = "aside:has(a[href*='/c/'])";
pub(crate) const CHAT_LINK_SELECTOR: &str = "a[href*='/c/']";
pub(crate) const CHAT_NAME_SELECTOR: &str = ".truncate";

/// Host sidebar structure captured once the sidebar watch first succeeds.
/// `template` can stay empty if the history renders without any chat section;
/// rendering is deferred until a later bind attempt captures one.
pub(crate) struct SidebarBinding {
    pub container: Option<Element>,
    pub template: Option<Element>,
    pub labels: Labels,
}

impl SidebarBinding {
    fn new(labels: Labels) -> SidebarBinding {
        SidebarBinding {
            container: None,
            template: None,
            labels,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.container.is_some()
    }
}

pub(crate) fn query(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}
