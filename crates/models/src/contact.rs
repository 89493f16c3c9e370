use serde::{Deserialize, Serialize};

/// Contact fields collected by the application form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update; absent fields are left as they are.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl ContactDetails {
    /// Names of the required fields that are still empty. Presence only: whitespace is a value.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.full_name.is_empty() {
            missing.push("fullName");
        }
        if self.email.is_empty() {
            missing.push("email");
        }
        if self.phone.is_empty() {
            missing.push("phone");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn apply(&mut self, patch: ContactPatch) {
        if let Some(v) = patch.full_name { self.full_name = v; }
        if let Some(v) = patch.email { self.email = v; }
        if let Some(v) = patch.phone { self.phone = v; }
        if let Some(v) = patch.address { self.address = Some(v); }
        if let Some(v) = patch.notes { self.notes = Some(v); }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_counts_as_present() {
        let c = ContactDetails { full_name: " ".into(), email: " ".into(), phone: " ".into(), ..Default::default() };
        assert!(c.missing_fields().is_empty());
        assert!(c.is_complete());
    }

    #[test]
    fn empty_fields_are_reported_in_form_order() {
        let c = ContactDetails { email: "a@b".into(), ..Default::default() };
        assert_eq!(c.missing_fields(), vec!["fullName", "phone"]);
        assert!(!c.is_complete());
    }

    #[test]
    fn no_format_validation_beyond_presence() {
        let c = ContactDetails { full_name: "R".into(), email: "not-an-email".into(), phone: "x".into(), ..Default::default() };
        assert!(c.is_complete());
    }

    #[test]
    fn patch_leaves_absent_fields() {
        let mut c = ContactDetails { full_name: "Ravi".into(), ..Default::default() };
        c.apply(ContactPatch { phone: Some("98260".into()), ..Default::default() });
        assert_eq!(c.full_name, "Ravi");
        assert_eq!(c.phone, "98260");
        assert_eq!(c.address, None);
    }
}
