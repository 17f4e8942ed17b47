#[test]
fn cli_tests() {
    let t = trycmd::TestCases::new();
    t.case("tests/cmd/*.toml");
}

#[test]
fn check_shipped_profiles() {
    for profile in ["default", "elegant"] {
        snapbox::cmd::Command::new(snapbox::cmd::cargo_bin!("indigits"))
            .current_dir("site")
            .args(["check", "--profile", profile])
            .assert()
            .success()
            .stdout_eq(format!("Profile `{profile}` is valid ([..] settings)\n"));
    }
}
