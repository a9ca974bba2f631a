/// What the server view shows in place of its content region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Error(String),
    Ready,
}

impl ViewState {
    /// Once the server is known the shell renders, even if an error from an
    /// earlier request is still around.
    pub fn resolve(ready: bool, error: Option<&str>) -> Self {
        match (ready, error) {
            (true, _) => ViewState::Ready,
            (false, Some(message)) if !message.is_empty() => ViewState::Error(message.to_string()),
            (false, _) => ViewState::Loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_render_table() {
        assert_eq!(ViewState::resolve(false, Some("nope")), ViewState::Error("nope".into()));
        assert_eq!(ViewState::resolve(false, None), ViewState::Loading);
        assert_eq!(ViewState::resolve(false, Some("")), ViewState::Loading);
        assert_eq!(ViewState::resolve(true, Some("nope")), ViewState::Ready);
        assert_eq!(ViewState::resolve(true, None), ViewState::Ready);
    }
}
