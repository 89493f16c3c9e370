use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Navigation hint returned alongside terminal error views.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NavAction {
    pub label: &'static str,
    pub href: &'static str,
}

impl NavAction {
    pub const BACK_TO_CATALOG: NavAction = NavAction { label: "Back to Services", href: "/" };
}
