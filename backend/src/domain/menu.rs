//! Navigation menu shown beside every screen.
//!
//! Entries that need a session are hidden from anonymous viewers. An entry
//! is active when the current path equals its target or sits beneath it,
//! so `/user` never lights up for `/user-management`.

use serde::Serialize;

struct MenuItem {
    key: &'static str,
    label: &'static str,
    path: Option<&'static str>,
    require_auth: bool,
    children: &'static [MenuItem],
}

const USER_MANAGEMENT_CHILDREN: [MenuItem; 2] = [
    MenuItem {
        key: "user-list",
        label: "User List",
        path: Some("/user-management"),
        require_auth: false,
        children: &[],
    },
    MenuItem {
        key: "add-user",
        label: "Add User",
        path: Some("/user-management?action=add"),
        require_auth: false,
        children: &[],
    },
];

const MENU: [MenuItem; 4] = [
    MenuItem {
        key: "home",
        label: "Home",
        path: Some("/"),
        require_auth: false,
        children: &[],
    },
    MenuItem {
        key: "about",
        label: "About",
        path: Some("/about"),
        require_auth: false,
        children: &[],
    },
    MenuItem {
        key: "user",
        label: "User Center",
        path: Some("/user"),
        require_auth: true,
        children: &[],
    },
    MenuItem {
        key: "user-management",
        label: "User Management",
        path: None,
        require_auth: true,
        children: &USER_MANAGEMENT_CHILDREN,
    },
];

/// One rendered menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    /// Stable identifier.
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Navigation target; groups have none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<&'static str>,
    /// Whether the entry points at the current screen.
    pub active: bool,
    /// Whether a group starts unfolded because a child is active.
    pub expanded: bool,
    /// Nested entries of a group.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuEntry>,
}

/// Whether `current` (a path without query) selects `target`.
///
/// The query part of `target` is ignored; `/` only matches itself.
fn is_active(target: &str, current: &str) -> bool {
    let bare = target.split('?').next().unwrap_or_default();
    if bare == "/" {
        return current == "/";
    }
    current == bare
        || current
            .strip_prefix(bare)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn render(item: &MenuItem, current: &str) -> MenuEntry {
    let children: Vec<MenuEntry> = item
        .children
        .iter()
        .map(|child| render(child, current))
        .collect();
    let expanded = children.iter().any(|child| child.active);
    MenuEntry {
        key: item.key,
        label: item.label,
        path: item.path,
        active: item.path.is_some_and(|path| is_active(path, current)),
        expanded,
        children,
    }
}

/// Menu for a viewer on `path`, hiding protected entries from anonymous
/// viewers.
///
/// # Examples
/// ```
/// use admin_console::domain::menu_for;
///
/// let keys: Vec<_> = menu_for("/about", false).iter().map(|e| e.key).collect();
/// assert_eq!(keys, ["home", "about"]);
/// ```
#[must_use]
pub fn menu_for(path: &str, authenticated: bool) -> Vec<MenuEntry> {
    let current = path.split(['?', '#']).next().unwrap_or_default();
    MENU.iter()
        .filter(|item| authenticated || !item.require_auth)
        .map(|item| render(item, current))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn keys(entries: &[MenuEntry]) -> Vec<&'static str> {
        entries.iter().map(|entry| entry.key).collect()
    }

    #[test]
    fn anonymous_viewers_see_public_entries_only() {
        assert_eq!(keys(&menu_for("/login", false)), ["home", "about"]);
    }

    #[test]
    fn signed_in_viewers_see_everything() {
        assert_eq!(
            keys(&menu_for("/", true)),
            ["home", "about", "user", "user-management"]
        );
    }

    #[rstest]
    #[case("/", "/", true)]
    #[case("/", "/about", false)]
    #[case("/user", "/user", true)]
    #[case("/user", "/user-management", false)]
    #[case("/user", "/user/settings", true)]
    #[case("/user-management?action=add", "/user-management", true)]
    fn active_matching_is_exact_or_nested(
        #[case] target: &str,
        #[case] current: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(is_active(target, current), expected);
    }

    #[test]
    fn group_expands_when_a_child_is_active() {
        let menu = menu_for("/user-management?page=2", true);
        let group = menu
            .iter()
            .find(|entry| entry.key == "user-management")
            .expect("group present");

        assert!(group.expanded);
        assert!(!group.active);
        assert!(group.children.iter().all(|child| child.active));

        let user = menu.iter().find(|entry| entry.key == "user").expect("user entry");
        assert!(!user.active);
    }
}
