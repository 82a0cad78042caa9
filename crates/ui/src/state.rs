//! Guess panel state

/// Label shown while waiting for the relay
pub const LOADING_TEXT: &str = "AI 正在思考...";

/// What the result area currently shows
///
/// A single enum, so loading, a guess, and an error are never shown together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PanelStatus {
    #[default]
    Empty,
    Loading,
    Guess(String),
    Error(String),
}

/// Result area below the canvas
#[derive(Debug, Clone, Default)]
pub struct GuessPanel {
    status: PanelStatus,
}

impl GuessPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &PanelStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == PanelStatus::Loading
    }

    /// The guess button is disabled while a request is in flight
    pub fn can_request_guess(&self) -> bool {
        !self.is_loading()
    }

    pub fn guess(&self) -> Option<&str> {
        match &self.status {
            PanelStatus::Guess(guess) => Some(guess),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            PanelStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Enter the loading state, dropping any previous result.
    /// Returns false if a request is already in flight.
    pub fn begin_request(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.status = PanelStatus::Loading;
        true
    }

    /// Leave the loading state with the request's outcome
    pub fn finish<E: std::fmt::Display>(&mut self, result: Result<String, E>) {
        self.status = match result {
            Ok(guess) => PanelStatus::Guess(guess),
            Err(e) => PanelStatus::Error(e.to_string()),
        };
    }

    /// Text for the result area, if anything is shown
    pub fn display_text(&self) -> Option<String> {
        match &self.status {
            PanelStatus::Empty => None,
            PanelStatus::Loading => Some(LOADING_TEXT.to_string()),
            PanelStatus::Guess(guess) => Some(guess.clone()),
            PanelStatus::Error(message) => Some(format!("错误: {message}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let panel = GuessPanel::new();
        assert_eq!(panel.status(), &PanelStatus::Empty);
        assert!(panel.can_request_guess());
        assert!(panel.display_text().is_none());
    }

    #[test]
    fn test_loading_blocks_second_request() {
        let mut panel = GuessPanel::new();
        assert!(panel.begin_request());
        assert!(!panel.can_request_guess());
        assert!(!panel.begin_request());
        assert_eq!(panel.display_text().as_deref(), Some(LOADING_TEXT));
    }

    #[test]
    fn test_success_replaces_loading() {
        let mut panel = GuessPanel::new();
        panel.begin_request();
        panel.finish::<String>(Ok("一个圆圈".into()));
        assert!(!panel.is_loading());
        assert_eq!(panel.guess(), Some("一个圆圈"));
        assert!(panel.error().is_none());
    }

    #[test]
    fn test_error_replaces_loading() {
        let mut panel = GuessPanel::new();
        panel.begin_request();
        panel.finish::<String>(Err("请求失败".into()));
        assert!(!panel.is_loading());
        assert!(panel.guess().is_none());
        assert_eq!(panel.display_text().as_deref(), Some("错误: 请求失败"));
    }

    #[test]
    fn test_new_request_clears_previous_result() {
        let mut panel = GuessPanel::new();
        panel.begin_request();
        panel.finish::<String>(Ok("猫".into()));
        panel.begin_request();
        assert!(panel.guess().is_none());
        assert!(panel.is_loading());
    }
}
