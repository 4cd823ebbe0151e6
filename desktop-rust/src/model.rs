use cableway_common::fields::{self, FieldDefinition, FieldGroup};
use cableway_common::{FormSnapshot, ImageList};
use std::path::PathBuf;

/// Text buffers behind the form, one per declared field
#[derive(Debug, Clone)]
pub struct FormState {
    values: Vec<(&'static FieldDefinition, String)>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            values: fields::FIELDS.iter().map(|f| (f, String::new())).collect(),
        }
    }
}

impl FormState {
    /// Editable buffers for one heading, in declared order
    pub fn group_mut(
        &mut self,
        group: FieldGroup,
    ) -> impl Iterator<Item = (&'static FieldDefinition, &mut String)> + '_ {
        self.values
            .iter_mut()
            .filter(move |(f, _)| f.group == group)
            .map(|(f, v)| (*f, v))
    }

    /// Copy of the current values; trimming happens in the snapshot
    pub fn snapshot(&self) -> cableway_common::Result<FormSnapshot> {
        FormSnapshot::from_pairs(self.values.iter().map(|(field, value)| (field.name, value.as_str())))
    }
}

/// Form buffers plus the photos attached so far. The image list only grows
/// while the window is open.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub form: FormState,
    pub images: ImageList,
}

impl AppState {
    /// Returns how many of `paths` were accepted
    pub fn add_images(&mut self, paths: impl IntoIterator<Item = PathBuf>) -> usize {
        self.images.extend(paths)
    }
}
