use serde::Serialize;

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct QuizOption {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind {
    Choice { options: &'static [QuizOption] },
    FreeText { placeholder: &'static str },
}

/// One screen of the quiz wizard.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct QuizStep {
    pub id: &'static str,
    pub question: &'static str,
    #[serde(flatten)]
    pub kind: StepKind,
}

impl QuizStep {
    pub fn accepts(&self, value: &str) -> bool {
        match &self.kind {
            StepKind::Choice { options } => options.iter().any(|option| option.id == value),
            StepKind::FreeText { .. } => true,
        }
    }
}

pub const SYSTEM_TYPE: &str = "systemType";
pub const HOUSE_TYPE: &str = "type";
pub const SIZE: &str = "size";
pub const HEATING_SOURCE: &str = "currentSystem";
pub const ISSUE: &str = "issue";
pub const PRIORITY: &str = "priority";
pub const REBATE: &str = "rebate";

/// Wizard steps in presentation order.
pub static QUIZ_STEPS: [QuizStep; 7] = [
    QuizStep {
        id: SYSTEM_TYPE,
        question: "What type of HVAC system do you currently have?",
        kind: StepKind::Choice {
            options: &[
                QuizOption { id: "split", label: "Split System (Outdoor Unit + Indoor Unit)" },
                QuizOption { id: "package", label: "Package Unit (Single Large Outdoor Unit)" },
                QuizOption { id: "gaspack", label: "Gas Pack (Gas Heat + Electric Cooling)" },
            ],
        },
    },
    QuizStep {
        id: HOUSE_TYPE,
        question: "What type of house do you have?",
        kind: StepKind::Choice {
            options: &[
                QuizOption { id: "ranch", label: "Ranch House" },
                QuizOption { id: "two-story", label: "Two-Story House" },
                QuizOption { id: "townhouse", label: "Townhouse" },
                QuizOption { id: "condo", label: "Condo" },
            ],
        },
    },
    QuizStep {
        id: SIZE,
        question: "What size system do you need?",
        kind: StepKind::Choice {
            options: &[
                QuizOption { id: "2ton", label: "2 Ton (1000-1200 sq ft)" },
                QuizOption { id: "3ton", label: "3 Ton (1200-1800 sq ft)" },
                QuizOption { id: "4ton", label: "4 Ton (1800-2400 sq ft)" },
                QuizOption { id: "5ton", label: "5 Ton (2400-3000 sq ft)" },
            ],
        },
    },
    QuizStep {
        id: HEATING_SOURCE,
        question: "What is your heating source?",
        kind: StepKind::Choice {
            options: &[
                QuizOption { id: "furnace", label: "Gas Furnace" },
                QuizOption { id: "heatpump", label: "Electric Heat Pump" },
                QuizOption { id: "boiler", label: "Boiler / Radiators" },
                QuizOption { id: "unknown", label: "I'm not sure" },
            ],
        },
    },
    QuizStep {
        id: ISSUE,
        question: "What is the main reason you're looking to replace?",
        kind: StepKind::Choice {
            options: &[
                QuizOption { id: "broken", label: "System is broken" },
                QuizOption { id: "old", label: "System is old (10+ years)" },
                QuizOption { id: "bills", label: "High energy bills" },
                QuizOption { id: "comfort", label: "Uneven temperatures" },
            ],
        },
    },
    QuizStep {
        id: PRIORITY,
        question: "What is most important to you for the new system?",
        kind: StepKind::Choice {
            options: &[
                QuizOption { id: "budget", label: "Lowest Upfront Cost" },
                QuizOption { id: "value", label: "Best Value (Cost vs. Performance)" },
                QuizOption { id: "performance", label: "Maximum Comfort & Efficiency" },
            ],
        },
    },
    QuizStep {
        id: REBATE,
        question: "Enter a promo code for rebates or discounts",
        kind: StepKind::FreeText {
            placeholder: "Enter promo code (e.g. FullSystem)",
        },
    },
];
