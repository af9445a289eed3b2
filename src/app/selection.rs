/// One picked tweet. The text is captured at selection time so the details
/// panel keeps showing it even if the backing record churns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::app) struct SelectedTweet {
    pub id: String,
    pub text: String,
}

/// Ordered set of selected tweets, newest first. Click toggling is the only
/// mutation path; a dataset swap resets it by rebuilding the view model.
#[derive(Default)]
pub(in crate::app) struct SelectionSet {
    entries: Vec<SelectedTweet>,
}

impl SelectionSet {
    pub fn toggle(&mut self, id: &str, text: &str) {
        if let Some(position) = self.entries.iter().position(|entry| entry.id == id) {
            self.entries.remove(position);
        } else {
            self.entries.insert(
                0,
                SelectedTweet {
                    id: id.to_owned(),
                    text: text.to_owned(),
                },
            );
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectedTweet> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes_the_same_id() {
        let mut selection = SelectionSet::default();

        selection.toggle("42", "first tweet");
        assert!(selection.contains("42"));
        assert_eq!(selection.len(), 1);

        selection.toggle("42", "first tweet");
        assert!(!selection.contains("42"));
        assert!(selection.is_empty());
    }

    #[test]
    fn newest_selection_comes_first() {
        let mut selection = SelectionSet::default();
        selection.toggle("1", "older");
        selection.toggle("2", "newer");

        let ids: Vec<&str> = selection.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
    }

    #[test]
    fn toggle_snapshots_the_text() {
        let mut selection = SelectionSet::default();
        selection.toggle("7", "as it was when clicked");

        let entry = selection.iter().next().unwrap();
        assert_eq!(entry.text, "as it was when clicked");
    }

    #[test]
    fn toggling_out_a_middle_entry_keeps_the_rest_ordered() {
        let mut selection = SelectionSet::default();
        selection.toggle("1", "a");
        selection.toggle("2", "b");
        selection.toggle("3", "c");

        selection.toggle("2", "b");

        let ids: Vec<&str> = selection.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, ["3", "1"]);
    }

    #[test]
    fn toggling_one_id_leaves_others_untouched() {
        let mut selection = SelectionSet::default();
        selection.toggle("1", "a");
        selection.toggle("2", "b");

        selection.toggle("1", "a");

        assert!(selection.contains("2"));
        assert!(!selection.contains("1"));
        assert_eq!(selection.len(), 1);
    }
}
