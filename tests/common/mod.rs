use assert_cmd::Command;
use std::path::Path;

pub fn notevault_cmd() -> Command {
    let mut cmd = Command::cargo_bin("notevault").unwrap();
    cmd.env_remove("NOTEVAULT_ROOT");
    cmd.env_remove("NOTEVAULT_USER");
    cmd.env_remove("NOTEVAULT_PASSWORD");
    cmd.env_remove("NOTEVAULT_LOG");
    cmd
}

/// A command acting as `user` (password `pw`) on the vault at `root`
#[allow(dead_code)]
pub fn user_cmd(root: &Path, user: &str) -> Command {
    let mut cmd = notevault_cmd();
    cmd.arg("--root")
        .arg(root)
        .arg("--user")
        .arg(user)
        .env("NOTEVAULT_PASSWORD", "pw");
    cmd
}

/// Register `user` with password `pw`
#[allow(dead_code)]
pub fn register(root: &Path, user: &str) {
    user_cmd(root, user).arg("register").assert().success();
}
