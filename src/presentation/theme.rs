use colored::Colorize;

pub struct Theme {
    pub title: fn(&str) -> String,
    pub pron: fn(&str) -> String,
    pub phonetic: fn(&str) -> String,
    pub line: fn(&str) -> String,
    pub idx: fn(&str) -> String,
    pub para: fn(&str) -> String,
    pub web: fn(&str) -> String,
    pub notice: fn(&str) -> String,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "temp" | "" => Self::temp(),
            "wudao" => Self::wudao(),
            "canvas" => Self::canvas(),
            _ => {
                eprintln!("{}", format!("✘ Unknown theme: {}", name).red());
                Self::temp() // Fallback to default
            }
        }
    }

    /// Styling for text carrying the given HTML class.
    pub fn for_class(&self, class: Option<&str>) -> fn(&str) -> String {
        match class {
            Some("trans") => self.title,
            Some("pronounce") => self.pron,
            Some("phonetic") => self.phonetic,
            Some("bullet") => self.idx,
            Some("web-trans") => self.web,
            _ => self.para,
        }
    }

    fn temp() -> Self {
        Self {
            title: |s| s.bright_magenta().italic().bold().underline().to_string(),
            pron: |s| s.normal().to_string(),
            phonetic: |s| s.cyan().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            idx: |s| s.bright_white().to_string(),
            para: |s| s.white().to_string(),
            web: |s| s.yellow().bold().to_string(),
            notice: |s| s.bright_white().dimmed().italic().to_string(),
        }
    }

    fn wudao() -> Self {
        Self {
            title: |s| s.red().italic().bold().underline().to_string(),
            pron: |s| s.cyan().to_string(),
            phonetic: |s| s.bright_cyan().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            idx: |s| s.bright_white().to_string(),
            para: |s| s.white().to_string(),
            web: |s| s.green().italic().to_string(),
            notice: |s| s.bright_yellow().dimmed().italic().to_string(),
        }
    }

    fn canvas() -> Self {
        Self {
            title: |s| s.blue().bold().underline().to_string(),
            pron: |s| s.magenta().to_string(),
            phonetic: |s| s.bright_magenta().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            idx: |s| s.cyan().to_string(),
            para: |s| s.black().to_string(),
            web: |s| s.bright_cyan().bold().to_string(),
            notice: |s| s.bright_black().italic().to_string(),
        }
    }
}
