use super::errors::StoreError;
use super::store::{MutationOutcome, TaskDataStore};

/// What, if anything, is open in an inline editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditTarget {
    #[default]
    None,
    EditingTask {
        id: String,
        folder_id: String,
        text: String,
        colour: String,
    },
    EditingFolder {
        id: String,
        name: String,
        colour: String,
    },
}

impl EditTarget {
    pub fn is_editing(&self) -> bool {
        !matches!(self, EditTarget::None)
    }

    /// Updates the label being edited (task text or folder name).
    pub fn set_label(&mut self, value: impl Into<String>) {
        match self {
            EditTarget::EditingTask { text, .. } => *text = value.into(),
            EditTarget::EditingFolder { name, .. } => *name = value.into(),
            EditTarget::None => {}
        }
    }

    pub fn set_colour(&mut self, value: impl Into<String>) {
        match self {
            EditTarget::EditingTask { colour, .. } | EditTarget::EditingFolder { colour, .. } => {
                *colour = value.into()
            }
            EditTarget::None => {}
        }
    }

    /// Sends the pending edit to the store and resets to `None`. A blank
    /// label is dropped without touching the store.
    pub async fn commit(&mut self, store: &mut TaskDataStore) -> Result<MutationOutcome, StoreError> {
        match std::mem::take(self) {
            EditTarget::None => Ok(MutationOutcome::Skipped),
            EditTarget::EditingTask {
                id,
                folder_id,
                text,
                colour,
            } => store.edit_task(&id, &folder_id, text.trim(), &colour).await,
            EditTarget::EditingFolder { id, name, colour } => {
                store.edit_folder(&id, name.trim(), &colour).await
            }
        }
    }

    pub fn cancel(&mut self) {
        *self = EditTarget::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_follow_variant() {
        let mut target = EditTarget::EditingFolder {
            id: "F1".into(),
            name: "Work".into(),
            colour: "#8b5cf6".into(),
        };
        target.set_label("Home");
        target.set_colour("#2563eb");
        assert_eq!(
            target,
            EditTarget::EditingFolder {
                id: "F1".into(),
                name: "Home".into(),
                colour: "#2563eb".into(),
            }
        );

        let mut none = EditTarget::None;
        none.set_label("ignored");
        assert!(!none.is_editing());
    }
}
