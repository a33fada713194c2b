/// Something text can be pasted from.
pub trait PasteSource {
    fn paste(&mut self) -> Option<String>;
}

/// The system clipboard, opened on first use.
///
/// Failures (no display server, empty or non-text clipboard) are logged and
/// yield nothing to paste.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl PasteSource for SystemClipboard {
    fn paste(&mut self) -> Option<String> {
        if self.inner.is_none() {
            match arboard::Clipboard::new() {
                Ok(clipboard) => self.inner = Some(clipboard),
                Err(err) => {
                    log::warn!("Clipboard unavailable: {}", err);
                    return None;
                }
            }
        }

        let clipboard = self.inner.as_mut()?;
        match clipboard.get_text() {
            Ok(text) => Some(text),
            Err(err) => {
                log::warn!("Cannot read clipboard text: {}", err);
                None
            }
        }
    }
}
