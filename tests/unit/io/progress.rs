//! Tests for stage progress bars

#[cfg(test)]
mod tests {
    use patchprob::io::progress::ProgressManager;

    // Tests quiet managers hand out hidden bars that still count
    #[test]
    fn test_quiet_stage_is_hidden() {
        let pm = ProgressManager::new(true);
        assert!(pm.is_quiet());

        let bar = pm.stage("Reading map", 10);
        assert!(bar.is_hidden());
        bar.inc(3);
        assert_eq!(bar.position(), 3);
        bar.finish();

        pm.message("not shown");
        pm.finish();
    }

    // Tests visible managers create bars with the stage length
    #[test]
    fn test_visible_stage_length() {
        let pm = ProgressManager::default();
        assert!(!pm.is_quiet());

        let bar = pm.stage("Performing analysis", 7);
        assert_eq!(bar.length(), Some(7));
        bar.set_length(12);
        assert_eq!(bar.length(), Some(12));
        bar.finish_and_clear();
        pm.finish();
    }
}
