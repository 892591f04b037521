#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Client {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Fields of a client update. `Some` means "write this value"; `None`
/// means the column is left untouched.
#[derive(Debug, Default, Clone)]
pub struct ClientPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl ClientPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }

    /// Columns to assign and the values to bind, in declaration order.
    pub fn assignments(&self) -> (Vec<&'static str>, Vec<&str>) {
        let mut columns = Vec::new();
        let mut values = Vec::new();

        if let Some(first_name) = &self.first_name {
            columns.push("first_name");
            values.push(first_name.as_str());
        }
        if let Some(last_name) = &self.last_name {
            columns.push("last_name");
            values.push(last_name.as_str());
        }
        if let Some(email) = &self.email {
            columns.push("email");
            values.push(email.as_str());
        }

        (columns, values)
    }
}

/// Lookup criteria for the client/phone join.
#[derive(Debug, Default, Clone)]
pub struct ClientFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ClientFilter {
    /// The single criterion to apply: the first present field wins, in
    /// first_name, last_name, email, phone order. Later fields are ignored
    /// even when also supplied. `None` means an unfiltered lookup.
    pub fn criterion(&self) -> Option<(&'static str, &str)> {
        if let Some(first_name) = &self.first_name {
            return Some(("c.first_name", first_name.as_str()));
        }
        if let Some(last_name) = &self.last_name {
            return Some(("c.last_name", last_name.as_str()));
        }
        if let Some(email) = &self.email {
            return Some(("c.email", email.as_str()));
        }
        if let Some(phone) = &self.phone {
            return Some(("cp.phone", phone.as_str()));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_has_no_assignments() {
        let patch = ClientPatch::default();
        assert!(patch.is_empty());

        let (columns, values) = patch.assignments();
        assert!(columns.is_empty());
        assert!(values.is_empty());
    }

    #[test]
    fn assignments_follow_declaration_order() {
        let patch = ClientPatch {
            first_name: Some("Oleg".into()),
            last_name: None,
            email: Some("olegov@example.com".into()),
        };
        assert!(!patch.is_empty());

        let (columns, values) = patch.assignments();
        assert_eq!(columns, vec!["first_name", "email"]);
        assert_eq!(values, vec!["Oleg", "olegov@example.com"]);
    }

    #[test]
    fn filter_without_fields_has_no_criterion() {
        assert_eq!(ClientFilter::default().criterion(), None);
    }

    #[test]
    fn filter_picks_first_present_field() {
        let filter = ClientFilter {
            last_name: Some("Olegov".into()),
            phone: Some("+79999".into()),
            ..ClientFilter::default()
        };
        assert_eq!(filter.criterion(), Some(("c.last_name", "Olegov")));

        let filter = ClientFilter {
            phone: Some("+79999".into()),
            ..ClientFilter::default()
        };
        assert_eq!(filter.criterion(), Some(("cp.phone", "+79999")));
    }

    #[test]
    fn filter_ignores_later_fields_when_an_earlier_one_is_present() {
        let filter = ClientFilter {
            first_name: Some("Oleg".into()),
            last_name: Some("Ivanov".into()),
            email: Some("ivanov@example.com".into()),
            phone: Some("+79999".into()),
        };
        assert_eq!(filter.criterion(), Some(("c.first_name", "Oleg")));
    }
}
