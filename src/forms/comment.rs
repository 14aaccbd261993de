use serde::Deserialize;

use crate::domain::lead::NewComment;
use crate::domain::types::CommentText;
use crate::forms::FormError;

#[derive(Debug, Deserialize)]
/// Form data for appending a comment to a lead.
pub struct AddCommentForm {
    #[serde(default)]
    pub text: String,
}

impl TryFrom<AddCommentForm> for NewComment {
    type Error = FormError;

    fn try_from(form: AddCommentForm) -> Result<Self, Self::Error> {
        let text = CommentText::new(form.text).map_err(|_| FormError::EmptyComment)?;
        Ok(NewComment::new(text))
    }
}
