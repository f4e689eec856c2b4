use serde::Serialize;

/// Number of options per question. Index 0 is the best answer, 3 the worst.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// One questionnaire item plus the report lines it contributes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u32,
    pub topic: &'static str,
    pub text: &'static str,
    pub options: [&'static str; OPTIONS_PER_QUESTION],
    #[serde(skip)]
    pub strength: &'static str,
    #[serde(skip)]
    pub improvement: &'static str,
}

pub static QUESTIONS: [Question; 5] = [
    Question {
        id: 1,
        topic: "workspace",
        text: "Do you have a dedicated workspace at home?",
        options: [
            "Yes, I have a separate office",
            "I have a dedicated desk in a shared space",
            "I work from various locations at home",
            "I don't have a dedicated space",
        ],
        strength: "You have a dedicated workspace set up for remote work",
        improvement: "Create a dedicated workspace with minimal distractions",
    },
    Question {
        id: 2,
        topic: "connectivity",
        text: "How would you rate your internet connection reliability?",
        options: [
            "Excellent - high-speed and very reliable",
            "Good - occasionally has minor issues",
            "Average - works but has frequent interruptions",
            "Poor - often unreliable",
        ],
        strength: "Your internet connection is reliable",
        improvement: "Improve your internet connection reliability",
    },
    Question {
        id: 3,
        topic: "collaboration tools",
        text: "How comfortable are you with digital communication tools?",
        options: [
            "Very comfortable - I use them daily",
            "Comfortable - I can use most tools efficiently",
            "Somewhat comfortable - I need time to learn new tools",
            "Not comfortable - I struggle with digital tools",
        ],
        strength: "You're comfortable with digital communication tools",
        improvement: "Practice using digital collaboration tools more regularly",
    },
    Question {
        id: 4,
        topic: "time management",
        text: "How do you manage your time when working independently?",
        options: [
            "I use structured systems and track my productivity",
            "I create daily to-do lists and schedules",
            "I work on tasks as they come up",
            "I struggle with time management without supervision",
        ],
        strength: "You have strong time management habits",
        improvement: "Develop structured time management practices",
    },
    Question {
        id: 5,
        topic: "troubleshooting",
        text: "How do you handle technical issues when working remotely?",
        options: [
            "I can troubleshoot and solve most problems myself",
            "I can handle basic issues and know when to ask for help",
            "I need guidance for most technical problems",
            "I get very frustrated and need immediate support",
        ],
        strength: "You can handle technical issues independently",
        improvement: "Build your technical troubleshooting skills",
    },
];
