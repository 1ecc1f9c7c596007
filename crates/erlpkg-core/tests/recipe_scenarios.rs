//! End-to-end recipe evaluation against a mocked native build system.

use std::path::PathBuf;
use std::sync::Arc;

use erlpkg_core::{
    ArtifactLocator, BuildInvocation, BuildOrchestrator, BuildOutcome, BuildSystemError,
    BuildSystemPort, COVERAGE_VARIABLE, EXAMPLES_VARIABLE, Os, OptionOverride, PackagePublisher,
    PublishError, Recipe, RecipeOption, Settings, apply_configure_rules, apply_declaration_rules,
    declare_defaults, declare_dependencies, resolve_options,
};
use mockall::mock;

mock! {
    pub BuildSystem {}

    impl BuildSystemPort for BuildSystem {
        fn configure(
            &self,
            settings: &Settings,
            variables: &BuildInvocation,
        ) -> Result<(), BuildSystemError>;
        fn build(&self) -> Result<(), BuildSystemError>;
        fn install(&self) -> Result<(), BuildSystemError>;
    }
}

mock! {
    pub Locator {}

    impl ArtifactLocator for Locator {
        fn find_libraries(&self, file_names: &[String]) -> Vec<PathBuf>;
    }
}

const ALL_OS: [Os; 4] = [Os::Linux, Os::Macos, Os::Windows, Os::FreeBsd];

fn orchestrator(mock: MockBuildSystem) -> BuildOrchestrator {
    BuildOrchestrator::new(Recipe::ERL, Arc::new(mock))
}

#[test]
fn test_scenario_a_windows_drops_fpic_at_declaration() {
    let settings = Settings::for_os(Os::Windows);
    let mut options = declare_defaults();

    apply_declaration_rules(&settings, &mut options);

    assert!(!options.contains(RecipeOption::Fpic));
    assert_eq!(options.get(RecipeOption::Shared), Some(false));
}

#[test]
fn test_scenario_b_shared_linux_drops_fpic_at_configure() {
    let settings = Settings::for_os(Os::Linux);
    let resolved = resolve_options(&settings, &[OptionOverride::new(RecipeOption::Shared, true)]);

    assert!(!resolved.contains(RecipeOption::Fpic));
    assert_eq!(resolved.get(RecipeOption::Shared), Some(true));
}

#[test]
fn test_scenario_c_skip_policy_never_touches_build_system() {
    let mut mock = MockBuildSystem::new();
    mock.expect_configure().never();
    mock.expect_build().never();

    let settings = Settings::for_os(Os::Linux);
    let resolved = resolve_options(&settings, &[OptionOverride::new(RecipeOption::Shared, false)]);

    let outcome = orchestrator(mock).build(&settings, &resolved, true).unwrap();
    assert_eq!(outcome, BuildOutcome::Skipped);
}

#[test]
fn test_scenario_d_invocation_forwards_coverage_and_examples() {
    let mut mock = MockBuildSystem::new();
    mock.expect_configure()
        .withf(|_, vars| {
            vars.len() == 2
                && vars.get(COVERAGE_VARIABLE) == Some(true)
                && vars.get(EXAMPLES_VARIABLE) == Some(false)
        })
        .times(1)
        .returning(|_, _| Ok(()));
    mock.expect_build().times(1).returning(|| Ok(()));

    let settings = Settings::for_os(Os::Linux);
    let resolved = resolve_options(
        &settings,
        &[
            OptionOverride::new(RecipeOption::Coverage, true),
            OptionOverride::new(RecipeOption::Examples, false),
        ],
    );

    let outcome = orchestrator(mock).build(&settings, &resolved, false).unwrap();
    let report = outcome.report().expect("build should have run");
    assert!(report.invocation.coverage());
    assert!(!report.invocation.examples());
    assert_eq!(report.reference, "erl/0.1");
}

#[test]
fn test_configure_receives_the_callers_settings() {
    let settings = Settings::for_os(Os::Macos);
    let expected = settings.clone();

    let mut mock = MockBuildSystem::new();
    mock.expect_configure()
        .withf(move |s, _| *s == expected)
        .times(1)
        .returning(|_, _| Ok(()));
    mock.expect_build().times(1).returning(|| Ok(()));

    orchestrator(mock)
        .build(&settings, &declare_defaults(), false)
        .unwrap();
}

#[test]
fn test_configure_failure_is_propagated_and_build_not_attempted() {
    let mut mock = MockBuildSystem::new();
    mock.expect_configure().times(1).returning(|_, _| {
        Err(BuildSystemError::ConfigureFailed {
            code: Some(1),
            message: "CMakeLists.txt not found".to_string(),
        })
    });
    mock.expect_build().never();

    let err = orchestrator(mock)
        .build(&Settings::for_os(Os::Linux), &declare_defaults(), false)
        .unwrap_err();

    assert!(matches!(err, BuildSystemError::ConfigureFailed { code: Some(1), .. }));
    assert!(err.to_string().contains("CMakeLists.txt not found"));
}

#[test]
fn test_build_failure_is_not_retried() {
    let mut mock = MockBuildSystem::new();
    mock.expect_configure().times(1).returning(|_, _| Ok(()));
    mock.expect_build().times(1).returning(|| {
        Err(BuildSystemError::BuildFailed {
            code: Some(2),
            message: "reflect.hpp:12: error".to_string(),
        })
    });

    let result = orchestrator(mock).build(&Settings::for_os(Os::Linux), &declare_defaults(), false);
    assert!(matches!(result, Err(BuildSystemError::BuildFailed { .. })));
}

#[test]
fn test_windows_never_keeps_fpic_whatever_the_overrides() {
    let settings = Settings::for_os(Os::Windows);
    for shared in [false, true] {
        for fpic in [false, true] {
            let resolved = resolve_options(
                &settings,
                &[
                    OptionOverride::new(RecipeOption::Shared, shared),
                    OptionOverride::new(RecipeOption::Fpic, fpic),
                ],
            );
            assert!(!resolved.contains(RecipeOption::Fpic));
        }
    }
}

#[test]
fn test_static_builds_off_windows_keep_fpic_value() {
    for os in ALL_OS.into_iter().filter(|os| *os != Os::Windows) {
        let settings = Settings::for_os(os);

        let defaulted = resolve_options(&settings, &[]);
        assert_eq!(defaulted.get(RecipeOption::Fpic), Some(true), "{os}");

        let overridden =
            resolve_options(&settings, &[OptionOverride::new(RecipeOption::Fpic, false)]);
        assert_eq!(overridden.get(RecipeOption::Fpic), Some(false), "{os}");
    }
}

#[test]
fn test_shared_builds_never_keep_fpic() {
    for os in ALL_OS {
        let mut options = declare_defaults();
        apply_declaration_rules(&Settings::for_os(os), &mut options);
        options.set(RecipeOption::Shared, true);
        apply_configure_rules(&Settings::for_os(os), &mut options);
        assert!(!options.contains(RecipeOption::Fpic), "{os}");
    }
}

#[test]
fn test_dependencies_are_independent_of_options_and_settings() {
    let expected = declare_dependencies();
    for os in ALL_OS {
        for shared in [false, true] {
            let _ = resolve_options(
                &Settings::for_os(os),
                &[OptionOverride::new(RecipeOption::Shared, shared)],
            );
            let deps = declare_dependencies();
            assert_eq!(deps.len(), 2);
            assert_eq!(deps, expected);
        }
    }
}

#[test]
fn test_package_runs_install_once() {
    let mut build = MockBuildSystem::new();
    build.expect_install().times(1).returning(|| Ok(()));
    let locator = MockLocator::new();

    let publisher = PackagePublisher::new(Recipe::ERL, Arc::new(build), Arc::new(locator));
    publisher.package().unwrap();
}

#[test]
fn test_publish_names_the_erl_library() {
    let mut locator = MockLocator::new();
    locator
        .expect_find_libraries()
        .withf(|names| names.len() == 2 && names[0] == "liberl.a" && names[1] == "liberl.so")
        .times(1)
        .returning(|_| vec![PathBuf::from("/pkg/lib/liberl.a")]);

    let publisher =
        PackagePublisher::new(Recipe::ERL, Arc::new(MockBuildSystem::new()), Arc::new(locator));
    let descriptor = publisher.publish(&Settings::for_os(Os::Linux)).unwrap();

    assert_eq!(descriptor.name, "erl");
    assert_eq!(descriptor.version, "0.1");
    assert_eq!(descriptor.libs, vec!["erl".to_string()]);
    assert_eq!(descriptor.artifacts, vec![PathBuf::from("/pkg/lib/liberl.a")]);
}

#[test]
fn test_publish_fails_loudly_without_artifacts() {
    let mut locator = MockLocator::new();
    locator.expect_find_libraries().returning(|_| Vec::new());

    let publisher =
        PackagePublisher::new(Recipe::ERL, Arc::new(MockBuildSystem::new()), Arc::new(locator));
    let err = publisher.publish(&Settings::for_os(Os::Windows)).unwrap_err();

    let PublishError::MissingArtifact { library, searched } = err;
    assert_eq!(library, "erl");
    assert_eq!(searched, vec!["erl.lib".to_string(), "erl.dll".to_string()]);
}
