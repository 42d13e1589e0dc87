/// A file selected in a form's file input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
    /// Set when the upload did not arrive intact.
    pub error: Option<String>,
}

impl FilePart {
    pub fn new(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
            ..Default::default()
        }
    }

    pub fn failed(file_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Browsers send a nameless, empty part for file inputs left untouched.
    pub fn is_selected(&self) -> bool {
        !self.file_name.is_empty()
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// One entry of a form, text or file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(FilePart),
}

/// Flat field set of a submitted form, in document order.
///
/// Repeated names keep every value; lookups return the last one, which is
/// what a server-side form parser exposes for scalar fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormData {
    parts: Vec<(String, FormValue)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_text(name, value);
        self
    }

    pub fn with_file(mut self, name: impl Into<String>, file: FilePart) -> Self {
        self.push_file(name, file);
        self
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push((name.into(), FormValue::Text(value.into())));
    }

    pub fn push_file(&mut self, name: impl Into<String>, file: FilePart) {
        self.parts.push((name.into(), FormValue::File(file)));
    }

    /// Replaces every text value of `name` with a single one, kept at the
    /// position of the first.
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        let mut value = Some(FormValue::Text(value.into()));

        self.parts.retain_mut(|(key, current)| {
            if key != name || !matches!(current, FormValue::Text(_)) {
                return true;
            }

            match value.take() {
                Some(value) => {
                    *current = value;
                    true
                }
                None => false,
            }
        });

        if let Some(value) = value {
            self.parts.push((name.to_owned(), value));
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields()
            .filter(|(key, _)| *key == name)
            .last()
            .map(|(_, value)| value)
    }

    pub fn file(&self, name: &str) -> Option<&FilePart> {
        self.files()
            .filter(|(key, _)| *key == name)
            .last()
            .map(|(_, file)| file)
    }

    /// Every entry, text and file interleaved as submitted.
    pub fn parts(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.parts.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parts().filter_map(|(key, value)| match value {
            FormValue::Text(text) => Some((key, text.as_str())),
            FormValue::File(_) => None,
        })
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &FilePart)> {
        self.parts().filter_map(|(key, value)| match value {
            FormValue::File(file) => Some((key, file)),
            FormValue::Text(_) => None,
        })
    }
}
