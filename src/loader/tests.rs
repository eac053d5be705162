// Provisioning pipeline tests

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use crate::config::LoaderConfig;
    use crate::error::{Error, LoadErrorKind, Result};
    use crate::loader::{discover_extract_location, DynamicLoader, EmbeddedResources, Provisioner};
    use crate::platform::{HostInfo, Platform};

    /// Records every load and fails the ones `verdict` rejects
    struct RecordingLoader {
        loaded: Vec<PathBuf>,
        verdict: Box<dyn Fn(&Path) -> Option<LoadErrorKind>>,
    }

    impl RecordingLoader {
        fn accepting() -> Self {
            Self::with(|_| None)
        }

        fn with(verdict: impl Fn(&Path) -> Option<LoadErrorKind> + 'static) -> Self {
            Self {
                loaded: Vec::new(),
                verdict: Box::new(verdict),
            }
        }

        fn loaded_names(&self) -> Vec<String> {
            self.loaded
                .iter()
                .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
                .collect()
        }
    }

    impl DynamicLoader for RecordingLoader {
        fn load(&mut self, path: &Path) -> Result<()> {
            match (self.verdict)(path) {
                Some(kind) => Err(Error::load(path, kind, "rejected by test loader")),
                None => {
                    self.loaded.push(path.to_path_buf());
                    Ok(())
                }
            }
        }
    }

    fn linux() -> HostInfo {
        HostInfo::new(Platform::Linux, true)
    }

    fn linux_natives() -> EmbeddedResources {
        EmbeddedResources::new()
            .with("libsteam_api.so", &b"steam_api"[..])
            .with("libsteamworks4j.so", &b"steamworks4j"[..])
    }

    const NAMES: [&str; 2] = ["steam_api", "steamworks4j"];

    #[test]
    fn test_loads_in_caller_order() {
        let temp = tempfile::tempdir().unwrap();
        let location = temp.path().join("natives").join("out");

        let mut provisioner = Provisioner::new(linux(), linux_natives(), RecordingLoader::accepting());
        let dir = provisioner.load_library_from([location], &NAMES).unwrap();

        assert_eq!(dir, temp.path().join("natives"));
        let loader = provisioner.into_loader();
        assert_eq!(loader.loaded_names(), vec!["libsteam_api.so", "libsteamworks4j.so"]);
        assert!(loader.loaded.iter().all(|p| p.is_absolute()));
        assert_eq!(fs::read(dir.join("libsteamworks4j.so")).unwrap(), b"steamworks4j");
    }

    #[test]
    fn test_unwritable_location_is_skipped() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, b"file, not a dir").unwrap();
        let first = blocker.join("out");
        let second = temp.path().join("good").join("out");

        let mut provisioner = Provisioner::new(linux(), linux_natives(), RecordingLoader::accepting());
        let dir = provisioner
            .load_library_from([first, second], &NAMES)
            .unwrap();

        assert_eq!(dir, temp.path().join("good"));
        assert_eq!(fs::read(&blocker).unwrap(), b"file, not a dir");

        let good_dir = fs::canonicalize(temp.path().join("good")).unwrap();
        let loader = provisioner.into_loader();
        assert_eq!(loader.loaded.len(), 2);
        assert!(loader.loaded.iter().all(|p| p.parent() == Some(good_dir.as_path())));
    }

    #[test]
    fn test_exhaustion_wraps_first_failure() {
        let temp = tempfile::tempdir().unwrap();
        let first = temp.path().join("one").join("out");
        let second = temp.path().join("two").join("out");

        let loader = RecordingLoader::with(|_| Some(LoadErrorKind::Other));
        let mut provisioner = Provisioner::new(linux(), linux_natives(), loader);
        let err = provisioner
            .load_library_from([first, second], &NAMES)
            .unwrap_err();

        let one = fs::canonicalize(temp.path().join("one")).unwrap();
        let two = fs::canonicalize(temp.path().join("two")).unwrap();
        match err {
            Error::Exhausted { first, secondary } => {
                assert_eq!(first.path(), Some(one.join("libsteam_api.so").as_path()));
                assert_eq!(secondary.len(), 1);
                assert_eq!(secondary[0].path(), Some(two.join("libsteam_api.so").as_path()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_windows_falls_back_to_32bit() {
        let temp = tempfile::tempdir().unwrap();
        let location = temp.path().join("natives").join("out");

        let resources = EmbeddedResources::new()
            .with("steam_api64.dll", &b"pe32+"[..])
            .with("steam_api.dll", &b"pe32"[..]);
        let loader = RecordingLoader::with(|path| {
            path.to_string_lossy()
                .ends_with("64.dll")
                .then_some(LoadErrorKind::ArchitectureMismatch)
        });

        let host = HostInfo::new(Platform::Windows, true);
        let mut provisioner = Provisioner::new(host, resources, loader);
        let dir = provisioner.load_library_from([location], &["steam_api"]).unwrap();

        assert!(dir.join("steam_api64.dll").exists());
        assert!(dir.join("steam_api.dll").exists());
        assert_eq!(provisioner.loader().loaded_names(), vec!["steam_api.dll"]);
    }

    #[test]
    fn test_no_32bit_retry_for_other_failures() {
        let temp = tempfile::tempdir().unwrap();
        let location = temp.path().join("natives").join("out");

        let resources = EmbeddedResources::new()
            .with("steam_api64.dll", &b"pe32+"[..])
            .with("steam_api.dll", &b"pe32"[..]);
        let loader = RecordingLoader::with(|_| Some(LoadErrorKind::Other));

        let host = HostInfo::new(Platform::Windows, true);
        let mut provisioner = Provisioner::new(host, resources, loader);
        let err = provisioner.load_library_from([location], &["steam_api"]).unwrap_err();

        match err {
            Error::Exhausted { secondary, .. } => assert!(secondary.is_empty()),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!temp.path().join("natives").join("steam_api.dll").exists());
    }

    #[test]
    fn test_failed_32bit_retry_is_kept_as_secondary() {
        let temp = tempfile::tempdir().unwrap();
        let location = temp.path().join("natives").join("out");

        let resources = EmbeddedResources::new()
            .with("steam_api64.dll", &b"pe32+"[..])
            .with("steam_api.dll", &b"pe32"[..]);
        let loader = RecordingLoader::with(|_| Some(LoadErrorKind::ArchitectureMismatch));

        let host = HostInfo::new(Platform::Windows, true);
        let mut provisioner = Provisioner::new(host, resources, loader);
        let err = provisioner.load_library_from([location], &["steam_api"]).unwrap_err();

        match err {
            Error::Exhausted { first, secondary } => {
                assert!(first.path().unwrap().ends_with("steam_api64.dll"));
                assert_eq!(secondary.len(), 1);
                assert!(secondary[0].path().unwrap().ends_with("steam_api.dll"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_resource_stops_before_loading() {
        let temp = tempfile::tempdir().unwrap();
        let location = temp.path().join("natives").join("out");

        let resources = EmbeddedResources::new().with("libsteam_api.so", &b"steam_api"[..]);
        let mut provisioner = Provisioner::new(linux(), resources, RecordingLoader::accepting());
        let err = provisioner.load_library_from([location], &NAMES).unwrap_err();

        match err {
            Error::Exhausted { first, .. } => {
                assert!(matches!(*first, Error::ResourceMissing { ref name, .. } if name == "libsteamworks4j.so"));
            }
            other => panic!("unexpected error: {other}"),
        }
        // The dependency was already loaded before the failure
        assert_eq!(provisioner.loader().loaded_names(), vec!["libsteam_api.so"]);
    }

    #[test]
    fn test_no_writable_location() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, b"").unwrap();

        let mut provisioner = Provisioner::new(linux(), linux_natives(), RecordingLoader::accepting());
        let err = provisioner
            .load_library_from([blocker.join("out")], &NAMES)
            .unwrap_err();

        assert!(matches!(err, Error::NoWritableLocation));
        assert!(provisioner.loader().loaded.is_empty());
    }

    #[test]
    fn test_load_library_uses_config_locations() {
        let temp = tempfile::tempdir().unwrap();
        let config = LoaderConfig {
            folder_tag: "steamworks4j_test".into(),
            temp_dir: Some(temp.path().to_path_buf()),
            home_dir: None,
            ..Default::default()
        };

        let mut provisioner = Provisioner::new(linux(), linux_natives(), RecordingLoader::accepting());
        let dir = provisioner.load_library(&config, &NAMES).unwrap();

        assert_eq!(dir, temp.path().join("steamworks4j_test"));
        assert!(dir.join("libsteam_api.so").is_file());
    }

    #[test]
    fn test_discover_extract_location() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        let good = temp.path().join("good").join("out");

        let found = discover_extract_location([blocker.join("out"), good.clone()]).unwrap();
        assert_eq!(found, good);

        let err = discover_extract_location([blocker.join("out")]).unwrap_err();
        assert!(matches!(err, Error::NoWritableLocation));
    }
}
