use crate::error::{Error, Result};
use crate::upload::is_image_mime;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Screen {
    Upload,
    Result,
}

/// Everything the page shows. Nothing here outlives the tab.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub image: Option<String>,
    pub generated_code: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl Session {
    pub fn screen(&self) -> Screen {
        if self.generated_code.is_empty() {
            Screen::Upload
        } else {
            Screen::Result
        }
    }

    /// Accept or reject a picked file. A rejected file only sets the
    /// error; whatever was on screen before stays there.
    /// `image_url` is only called for files that are accepted.
    pub fn select<F>(&mut self, mime_type: &str, image_url: F) -> Result<()>
    where
        F: FnOnce() -> String,
    {
        if self.loading {
            return Err(Error::Busy);
        }

        if !is_image_mime(mime_type) {
            let e = Error::NotAnImage(mime_type.to_string());
            self.error = Some(e.user_message().to_string());
            return Err(e);
        }

        self.image = Some(image_url());
        self.loading = true;
        self.error = None;
        Ok(())
    }

    pub fn finish(&mut self, result: &Result<String>) {
        match result {
            Ok(code) => self.generated_code = code.clone(),
            Err(e) => self.error = Some(e.user_message().to_string()),
        }
        self.loading = false;
    }

    /// Start over. Hands back the image URL so the caller can free it.
    pub fn reset(&mut self) -> Option<String> {
        self.generated_code.clear();
        self.error = None;
        self.image.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GENERATION_FAILED, NOT_AN_IMAGE};
    use pretty_assertions::assert_eq;

    fn generated() -> Session {
        let mut session = Session::default();
        session.select("image/png", || "blob:one".into()).unwrap();
        session.finish(&Ok("<p>one</p>".to_string()));
        session
    }

    #[test]
    fn starts_on_upload_screen() {
        let session = Session::default();
        assert_eq!(session.screen(), Screen::Upload);
        assert!(!session.loading);
        assert_eq!(session.error, None);
    }

    #[test]
    fn accepted_image_starts_loading_and_clears_error() {
        let mut session = Session::default();
        session.error = Some("old".into());

        session.select("image/jpeg", || "blob:a".into()).unwrap();

        assert_eq!(session.image.as_deref(), Some("blob:a"));
        assert!(session.loading);
        assert_eq!(session.error, None);
        assert_eq!(session.screen(), Screen::Upload);
    }

    #[test]
    fn non_image_only_sets_the_error() {
        let mut session = Session::default();
        session.select("image/png", || "blob:a".into()).unwrap();
        session.finish(&Err(Error::EmptyResponse));
        let before = session.clone();

        let result = session.select("application/pdf", || "blob:b".into());

        assert_eq!(result, Err(Error::NotAnImage("application/pdf".into())));
        assert_eq!(session.error.as_deref(), Some(NOT_AN_IMAGE));
        assert_eq!(
            Session {
                error: before.error.clone(),
                ..session.clone()
            },
            before
        );
    }

    #[test]
    fn success_shows_result_screen() {
        let session = generated();
        assert_eq!(session.screen(), Screen::Result);
        assert_eq!(session.generated_code, "<p>one</p>");
        assert!(!session.loading);
    }

    #[test]
    fn failure_shows_generic_message_and_keeps_image() {
        let mut session = Session::default();
        session.select("image/webp", || "blob:a".into()).unwrap();

        session.finish(&Err(Error::Network("connection reset".into())));

        assert!(!session.loading);
        assert_eq!(session.error.as_deref(), Some(GENERATION_FAILED));
        assert_eq!(session.image.as_deref(), Some("blob:a"));
        assert_eq!(session.screen(), Screen::Upload);
    }

    #[test]
    fn selections_are_ignored_while_loading() {
        let mut session = Session::default();
        session.select("image/png", || "blob:a".into()).unwrap();
        let before = session.clone();

        let result = session.select("image/png", || panic!("no url while busy"));

        assert_eq!(result, Err(Error::Busy));
        assert_eq!(session, before);
    }

    #[test]
    fn rejected_files_never_get_an_object_url() {
        let mut session = Session::default();
        let result = session.select("text/plain", || panic!("no url for rejected files"));
        assert!(result.is_err());
        assert_eq!(session.image, None);
    }

    #[test]
    fn reset_returns_to_upload_screen() {
        let mut session = generated();

        assert_eq!(session.reset(), Some("blob:one".to_string()));
        assert_eq!(session, Session::default());
        assert_eq!(session.reset(), None);
    }
}
