use std::env;
use std::fmt;

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Ja,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Ja];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ja => "ja",
        }
    }

    /// Accepts plain codes as well as POSIX-style values such as `ja_JP.UTF-8`
    pub fn from_code(code: &str) -> Option<Self> {
        let language = code
            .split(['_', '-', '.', '@'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        Self::ALL.into_iter().find(|l| l.code() == language)
    }

    /// Supported locale for `code`, or the default one
    pub fn resolve(code: &str) -> Self {
        Self::from_code(code).unwrap_or_else(|| {
            debug!("Unsupported locale '{}', using {}", code, Locale::default());
            Locale::default()
        })
    }

    /// Locale from the process environment, see [`Locale::detect_with`]
    pub fn detect() -> Self {
        Self::detect_with(|var| env::var(var).ok())
    }

    /// The first non-empty of `LC_ALL`, `LC_MESSAGES` and `LANG` decides, so
    /// `LC_ALL=C` selects the default locale even when `LANG` names another.
    pub fn detect_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| lookup(var))
            .find(|value| !value.trim().is_empty())
            .map(|value| Self::resolve(&value))
            .unwrap_or_default()
    }

    pub fn text(self, key: MessageKey) -> &'static str {
        match self {
            Locale::En => english(key),
            Locale::Ja => japanese(key),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    Title,
    ProblemLabel,
    ResetButton,
    BackspaceButton,
    ClearButton,
    CompletionMessage,
    RestartButton,
    SuccessMessage,
    ConfirmResetPrompt,
    ConfirmYesHint,
    DigitUnavailable,
    UnknownInput,
    HintLabel,
    NoHint,
}

impl MessageKey {
    pub const ALL: [MessageKey; 14] = [
        MessageKey::Title,
        MessageKey::ProblemLabel,
        MessageKey::ResetButton,
        MessageKey::BackspaceButton,
        MessageKey::ClearButton,
        MessageKey::CompletionMessage,
        MessageKey::RestartButton,
        MessageKey::SuccessMessage,
        MessageKey::ConfirmResetPrompt,
        MessageKey::ConfirmYesHint,
        MessageKey::DigitUnavailable,
        MessageKey::UnknownInput,
        MessageKey::HintLabel,
        MessageKey::NoHint,
    ];
}

fn english(key: MessageKey) -> &'static str {
    match key {
        MessageKey::Title => "Make 10",
        MessageKey::ProblemLabel => "Problem",
        MessageKey::ResetButton => "reset",
        MessageKey::BackspaceButton => "back",
        MessageKey::ClearButton => "clear",
        MessageKey::CompletionMessage => "All problems solved! Congratulations!",
        MessageKey::RestartButton => "restart",
        MessageKey::SuccessMessage => "OK! Correct!",
        MessageKey::ConfirmResetPrompt => "Reset your progress and go back to problem 1?",
        MessageKey::ConfirmYesHint => "(y/N)",
        MessageKey::DigitUnavailable => "That digit is not part of this problem",
        MessageKey::UnknownInput => "Unrecognized input",
        MessageKey::HintLabel => "Hint",
        MessageKey::NoHint => "No solution exists for this problem",
    }
}

fn japanese(key: MessageKey) -> &'static str {
    match key {
        MessageKey::Title => "10を作ろう",
        MessageKey::ProblemLabel => "問題",
        MessageKey::ResetButton => "リセット (reset)",
        MessageKey::BackspaceButton => "一つ消す (back)",
        MessageKey::ClearButton => "クリア (clear)",
        MessageKey::CompletionMessage => "全問クリア！おめでとうございます！",
        MessageKey::RestartButton => "最初から (restart)",
        MessageKey::SuccessMessage => "正解！",
        MessageKey::ConfirmResetPrompt => "進捗をリセットして問題1に戻りますか？",
        MessageKey::ConfirmYesHint => "(y/N)",
        MessageKey::DigitUnavailable => "その数字はこの問題にありません",
        MessageKey::UnknownInput => "入力を認識できません",
        MessageKey::HintLabel => "ヒント",
        MessageKey::NoHint => "この問題には解がありません",
    }
}

/// Text for `key` in `locale_code`, falling back to the default locale
pub fn lookup(locale_code: &str, key: MessageKey) -> &'static str {
    Locale::resolve(locale_code).text(key)
}
