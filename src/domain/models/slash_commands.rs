#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .split_whitespace()
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }

        let prefix = args.remove(0);
        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit()
            || cmd.is_new_session()
            || cmd.is_list_sessions()
            || cmd.is_select_session()
            || cmd.is_rename_session()
            || cmd.is_delete_session()
            || cmd.is_stops()
            || cmd.is_directions()
            || cmd.is_export()
            || cmd.is_navigate()
            || cmd.is_panel()
            || cmd.is_locate()
            || cmd.is_map()
            || cmd.is_help()
        {
            return Some(cmd);
        }

        return None;
    }

    /// Arguments joined back into a single string, for commands that take
    /// free text such as a new session name.
    pub fn rest(&self) -> String {
        return self.args.join(" ");
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_new_session(&self) -> bool {
        return ["/n", "/new"].contains(&self.command.as_str());
    }

    pub fn is_list_sessions(&self) -> bool {
        return ["/ls", "/sessions"].contains(&self.command.as_str());
    }

    pub fn is_select_session(&self) -> bool {
        return ["/s", "/select"].contains(&self.command.as_str()) && !self.args.is_empty();
    }

    pub fn is_rename_session(&self) -> bool {
        return ["/rename"].contains(&self.command.as_str()) && !self.args.is_empty();
    }

    pub fn is_delete_session(&self) -> bool {
        return ["/d", "/delete"].contains(&self.command.as_str());
    }

    pub fn is_stops(&self) -> bool {
        return ["/stops"].contains(&self.command.as_str());
    }

    pub fn is_directions(&self) -> bool {
        return ["/dir", "/directions"].contains(&self.command.as_str());
    }

    pub fn is_export(&self) -> bool {
        return ["/x", "/export"].contains(&self.command.as_str());
    }

    pub fn is_navigate(&self) -> bool {
        return ["/nav", "/navigate"].contains(&self.command.as_str());
    }

    pub fn is_panel(&self) -> bool {
        return ["/p", "/panel"].contains(&self.command.as_str());
    }

    pub fn is_locate(&self) -> bool {
        return ["/locate"].contains(&self.command.as_str());
    }

    pub fn is_map(&self) -> bool {
        return ["/m", "/map"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }
}
