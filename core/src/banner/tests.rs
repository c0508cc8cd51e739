use super::*;
use crate::storage::MemoryStore;
use crate::types::{AcceptedMode, CONSENT_TTL};
use std::time::{Duration, UNIX_EPOCH};

mod common {
    use super::*;

    #[derive(Debug, Default)]
    pub(super) struct RecordingHost {
        pub visibility: Vec<bool>,
        pub reloads: usize,
    }

    impl PageHost for RecordingHost {
        fn set_banner_visible(&mut self, visible: bool) {
            self.visibility.push(visible);
        }

        fn reload(&mut self) {
            self.reloads += 1;
        }
    }

    pub(super) fn create_controller() -> BannerController<MemoryStore, RecordingHost> {
        BannerController::new(
            ConsentStore::new(MemoryStore::new()),
            RecordingHost::default(),
        )
    }

    pub(super) fn now() -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(1_792_143_000_123)
    }
}

mod actions {
    use super::*;

    #[test]
    fn test_parse_action_ids() {
        assert_eq!("accept-all".parse::<BannerAction>(), Ok(BannerAction::AcceptAll));
        assert_eq!("reject".parse::<BannerAction>(), Ok(BannerAction::Reject));
        assert_eq!(
            " save-preferences ".parse::<BannerAction>(),
            Ok(BannerAction::SavePreferences)
        );
        assert_eq!(
            "toggle-preferences".parse::<BannerAction>(),
            Ok(BannerAction::TogglePreferences)
        );
    }

    #[test]
    fn test_labels_are_not_action_ids() {
        assert_eq!(
            "Aceptar todas".parse::<BannerAction>(),
            Err(BannerError::UnknownAction("Aceptar todas".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips_button_ids() {
        for action in [
            BannerAction::AcceptAll,
            BannerAction::Reject,
            BannerAction::SavePreferences,
            BannerAction::TogglePreferences,
        ] {
            assert_eq!(action.to_string().parse::<BannerAction>(), Ok(action));
        }
        assert_eq!(BannerAction::SetAnalytics(true).to_string(), "analytics=true");
        assert_eq!(BannerAction::SetMarketing(true).id(), None);
    }
}

mod page_load {
    use super::common::{create_controller, now};
    use super::*;

    #[test]
    fn test_banner_shown_without_consent() {
        let mut controller = create_controller();

        assert!(!controller.on_page_load(now()).unwrap());
        assert!(controller.state().visible);
        assert_eq!(controller.host().visibility, vec![true]);
    }

    #[test]
    fn test_banner_hidden_with_valid_consent() {
        let mut controller = create_controller();
        controller.dispatch(BannerAction::AcceptAll, now()).unwrap();

        assert!(controller.on_page_load(now()).unwrap());
        assert!(!controller.state().visible);
    }

    #[test]
    fn test_navigation_after_expiry_shows_banner_again() {
        let mut controller = create_controller();
        controller.dispatch(BannerAction::Reject, now()).unwrap();
        assert!(controller.on_page_load(now()).unwrap());

        assert!(!controller.on_page_load(now() + CONSENT_TTL).unwrap());
        assert!(controller.state().visible);
        assert_eq!(controller.consent().get_consent().unwrap(), None);
    }
}

mod dispatch {
    use super::common::{create_controller, now};
    use super::*;

    #[test]
    fn test_accept_all_saves_and_hides() {
        let mut controller = create_controller();
        controller.dispatch(BannerAction::AcceptAll, now()).unwrap();

        let record = controller.consent().get_consent().unwrap().unwrap();
        assert_eq!(record.preferences(), ConsentPreferences::accept_all());
        assert!(!controller.state().visible);
        assert_eq!(controller.host().visibility, vec![false]);
    }

    #[test]
    fn test_reject_saves_essential_only() {
        let mut controller = create_controller();
        controller.dispatch(BannerAction::Reject, now()).unwrap();

        let record = controller.consent().get_consent().unwrap().unwrap();
        assert_eq!(record.accepted_mode, AcceptedMode::EssentialOnly);
        assert!(!record.analytics);
        assert!(!record.marketing);
    }

    #[test]
    fn test_save_preferences_uses_staged_toggles() {
        let mut controller = create_controller();
        controller
            .dispatch(BannerAction::TogglePreferences, now())
            .unwrap();
        controller
            .dispatch(BannerAction::SetAnalytics(true), now())
            .unwrap();
        controller
            .dispatch(BannerAction::SetMarketing(false), now())
            .unwrap();
        assert!(controller.state().preferences_open);

        // Toggles alone persist nothing.
        assert_eq!(controller.consent().get_consent().unwrap(), None);

        controller
            .dispatch(BannerAction::SavePreferences, now())
            .unwrap();

        let record = controller.consent().get_consent().unwrap().unwrap();
        assert_eq!(record.preferences(), ConsentPreferences::custom(true, false));
        assert!(!controller.state().preferences_open);
        assert!(!controller.state().visible);
    }

    #[test]
    fn test_toggle_preferences_flips_panel() {
        let mut controller = create_controller();

        controller
            .dispatch(BannerAction::TogglePreferences, now())
            .unwrap();
        assert!(controller.state().preferences_open);

        controller
            .dispatch(BannerAction::TogglePreferences, now())
            .unwrap();
        assert!(!controller.state().preferences_open);
        assert!(controller.host().visibility.is_empty());
    }

    #[test]
    fn test_failed_save_keeps_banner_visible() {
        let mut controller = BannerController::new(
            ConsentStore::new(MemoryStore::unavailable()),
            super::common::RecordingHost::default(),
        );

        controller
            .dispatch(BannerAction::AcceptAll, now())
            .unwrap_err();

        assert!(controller.state().visible);
        assert!(controller.host().visibility.is_empty());
    }
}

mod clear {
    use super::common::{create_controller, now};
    use super::*;

    #[test]
    fn test_clear_consent_reloads_and_banner_returns() {
        let mut controller = create_controller();
        controller.dispatch(BannerAction::AcceptAll, now()).unwrap();

        controller.clear_consent().unwrap();
        assert_eq!(controller.host().reloads, 1);

        assert!(!controller.on_page_load(now()).unwrap());
        assert!(controller.state().visible);
    }
}
