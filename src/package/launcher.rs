//! Launcher script installed as `<prefix>/bin/<app>`.

use crate::config::{InstallLayout, LauncherConfig};

/// Render the launcher script.
///
/// The optional self-update block runs `<tool> needs-update` and, when it
/// exits with 1, opens `<terminal>` to run `<tool> --silent`.
pub fn render_launcher(layout: &InstallLayout, launcher: &LauncherConfig) -> String {
    let mut script = String::from("#!/bin/bash\n\n");

    if let Some(update) = &launcher.self_update {
        script.push_str(&format!(
            "if which {tool}; then\n    {tool} needs-update\n    if [[ \"$?\" == 1 ]]; then\n        {terminal} -e '{tool} --silent'\n    fi\nfi\n\n",
            tool = update.tool,
            terminal = update.terminal,
        ));
    }

    script.push_str(&format!(
        "{} '{}' \"$@\"\n",
        launcher.runtime,
        layout.packed_resources().display()
    ));
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> InstallLayout {
        InstallLayout::new("/usr/local", "discord")
    }

    #[test]
    fn default_launcher_checks_for_updates() {
        let script = render_launcher(&layout(), &LauncherConfig::default());
        assert_eq!(
            script,
            r#"#!/bin/bash

if which update-discord; then
    update-discord needs-update
    if [[ "$?" == 1 ]]; then
        konsole -e 'update-discord --silent'
    fi
fi

electron '/usr/local/lib/discord/app.asar' "$@"
"#
        );
    }

    #[test]
    fn launcher_without_self_update() {
        let config = LauncherConfig {
            runtime: "electron28".to_string(),
            self_update: None,
        };
        let script = render_launcher(&InstallLayout::new("/opt", "chat"), &config);
        assert_eq!(
            script,
            "#!/bin/bash\n\nelectron28 '/opt/lib/chat/app.asar' \"$@\"\n"
        );
    }
}
