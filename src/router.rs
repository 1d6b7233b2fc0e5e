/// The mutually exclusive screens of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Screen {
    Landing,
    Start,
    Quiz,
    Notes,
    #[strum(to_string = "Summary audio")]
    SummaryAudio,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Landing,
        Screen::Start,
        Screen::Quiz,
        Screen::Notes,
        Screen::SummaryAudio,
    ];

    fn index(self) -> usize {
        match self {
            Screen::Landing => 0,
            Screen::Start => 1,
            Screen::Quiz => 2,
            Screen::Notes => 3,
            Screen::SummaryAudio => 4,
        }
    }
}

/// Tracks the visible screen and a loading flag per screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenRouter {
    active: Screen,
    loading: [bool; 5],
}

impl Default for ScreenRouter {
    fn default() -> Self {
        Self {
            active: Screen::Landing,
            loading: [false; 5],
        }
    }
}

impl ScreenRouter {
    pub fn active(&self) -> Screen {
        self.active
    }

    pub fn is_active(&self, screen: Screen) -> bool {
        self.active == screen
    }

    pub fn show(&mut self, screen: Screen) {
        if self.active != screen {
            tracing::debug!(from = %self.active, to = %screen, "screen change");
        }
        self.active = screen;
    }

    pub fn set_loading(&mut self, screen: Screen, loading: bool) {
        self.loading[screen.index()] = loading;
    }

    pub fn is_loading(&self, screen: Screen) -> bool {
        self.loading[screen.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_landing_with_nothing_loading() {
        let router = ScreenRouter::default();
        assert_eq!(router.active(), Screen::Landing);
        assert!(Screen::ALL.iter().all(|s| !router.is_loading(*s)));
    }

    #[test]
    fn show_activates_exactly_one_screen() {
        let mut router = ScreenRouter::default();
        router.show(Screen::Notes);

        let active: Vec<_> = Screen::ALL
            .iter()
            .filter(|s| router.is_active(**s))
            .collect();
        assert_eq!(active, vec![&Screen::Notes]);
    }

    #[test]
    fn loading_is_scoped_to_one_screen() {
        let mut router = ScreenRouter::default();
        router.set_loading(Screen::Start, true);
        assert!(router.is_loading(Screen::Start));
        assert!(!router.is_loading(Screen::Quiz));

        // visibility changes leave loading flags alone
        router.show(Screen::Quiz);
        assert!(router.is_loading(Screen::Start));

        router.set_loading(Screen::Start, false);
        assert!(!router.is_loading(Screen::Start));
    }

    #[test]
    fn screen_display_names() {
        assert_eq!(Screen::Landing.to_string(), "Landing");
        assert_eq!(Screen::SummaryAudio.to_string(), "Summary audio");
    }
}
