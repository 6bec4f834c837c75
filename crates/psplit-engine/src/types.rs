use serde::{Deserialize, Serialize};

/// How a penalty item's amount is redistributed.
///
/// Serialized in kebab-case (`exclude-penalized`, `exclude-self`, `include-self`),
/// which is also the persisted snapshot spelling.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PenaltyMode {
    /// Every included member except anyone charged by any `exclude-penalized` item.
    #[default]
    ExcludePenalized,
    /// Every included member except this item's payer.
    ExcludeSelf,
    /// Every included member, the payer too.
    IncludeSelf,
}

impl PenaltyMode {
    pub const ALL: [PenaltyMode; 3] = [
        PenaltyMode::ExcludePenalized,
        PenaltyMode::ExcludeSelf,
        PenaltyMode::IncludeSelf,
    ];

    /// Persisted spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            PenaltyMode::ExcludePenalized => "exclude-penalized",
            PenaltyMode::ExcludeSelf => "exclude-self",
            PenaltyMode::IncludeSelf => "include-self",
        }
    }

    /// Short human label.
    pub fn label(&self) -> &'static str {
        match self {
            PenaltyMode::ExcludePenalized => "exclude penalized",
            PenaltyMode::ExcludeSelf => "exclude self",
            PenaltyMode::IncludeSelf => "include self",
        }
    }

    /// Label used next to the distributed amount ("... split").
    pub fn label_with_dist(&self) -> &'static str {
        match self {
            PenaltyMode::ExcludePenalized => "split excluding penalized",
            PenaltyMode::ExcludeSelf => "split excluding self",
            PenaltyMode::IncludeSelf => "split including self",
        }
    }

    /// Parse the persisted spelling. Unknown values return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s.trim())
    }
}

impl std::fmt::Display for PenaltyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A roster entry.
///
/// `exclude` removes the member from every distribution pool but not from
/// the roster and not from penalty liability.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub exclude: bool,
    pub note: String,
}

impl Member {
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            exclude: false,
            note: String::new(),
        }
    }

    pub fn excluded(mut self) -> Self {
        self.exclude = true;
        self
    }

    pub fn with_note<S: Into<String>>(mut self, note: S) -> Self {
        self.note = note.into();
        self
    }

    /// Copy with the name trimmed; what the engine actually works on.
    pub(crate) fn normalized(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.trim().to_string(),
            exclude: self.exclude,
            note: self.note.clone(),
        }
    }
}

/// Income entry. `fee_rate` is a percentage and may be fractional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IncomeItem {
    pub id: String,
    pub label: String,
    pub gross: f64,
    pub fee_rate: f64,
}

impl IncomeItem {
    pub fn new<S: Into<String>>(label: S, gross: f64, fee_rate: f64) -> Self {
        Self {
            id: String::new(),
            label: label.into(),
            gross,
            fee_rate,
        }
    }
}

/// Fixed off-the-top payment to one member.
///
/// `recipient_id` may be absent or point at a member that no longer exists;
/// in both cases the amount is still deducted from the pool but credited to nobody.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IncentiveItem {
    pub id: String,
    pub label: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
}

impl IncentiveItem {
    pub fn new<S: Into<String>>(label: S, amount: f64, recipient_id: Option<&str>) -> Self {
        Self {
            id: String::new(),
            label: label.into(),
            amount,
            recipient_id: recipient_id.map(str::to_string),
        }
    }
}

/// Charge against one member, redistributed according to `mode`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PenaltyItem {
    pub id: String,
    pub label: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer_id: Option<String>,
    pub mode: PenaltyMode,
}

impl PenaltyItem {
    pub fn new<S: Into<String>>(
        label: S,
        amount: f64,
        payer_id: Option<&str>,
        mode: PenaltyMode,
    ) -> Self {
        Self {
            id: String::new(),
            label: label.into(),
            amount,
            payer_id: payer_id.map(str::to_string),
            mode,
        }
    }
}

/// Complete input snapshot handed to [`crate::compute`].
///
/// `date`, `title` and `memo` are free text carried for presentation only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SplitState {
    pub date: String,
    pub title: String,
    pub memo: String,
    pub members: Vec<Member>,
    pub income_items: Vec<IncomeItem>,
    pub incentives: Vec<IncentiveItem>,
    pub penalty_items: Vec<PenaltyItem>,
}

impl SplitState {
    /// Empty snapshot dated `date`.
    pub fn blank<S: Into<String>>(date: S) -> Self {
        Self {
            date: date.into(),
            ..Self::default()
        }
    }
}
