//! Static catalogue of health topics shown on the dashboard.

use std::fmt;
use std::str::FromStr;

use arogya_core::types::Language;

use crate::error::ChatError;

/// Stable identifier of a topic card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicId {
    Vaccination,
    DiseaseSymptoms,
    PreventiveCare,
    MaternalChild,
    EmergencySigns,
    Nutrition,
}

impl TopicId {
    pub const ALL: [TopicId; 6] = [
        TopicId::Vaccination,
        TopicId::DiseaseSymptoms,
        TopicId::PreventiveCare,
        TopicId::MaternalChild,
        TopicId::EmergencySigns,
        TopicId::Nutrition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TopicId::Vaccination => "vaccination",
            TopicId::DiseaseSymptoms => "disease-symptoms",
            TopicId::PreventiveCare => "preventive-care",
            TopicId::MaternalChild => "maternal-child",
            TopicId::EmergencySigns => "emergency-signs",
            TopicId::Nutrition => "nutrition",
        }
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopicId {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TopicId::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| ChatError::UnknownTopic(s.to_string()))
    }
}

/// A topic card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topic {
    pub id: TopicId,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub urgent: bool,
    pub popular: bool,
}

const ENGLISH: [Topic; 6] = [
    Topic {
        id: TopicId::Vaccination,
        title: "Vaccination Schedule",
        description: "Complete immunization schedule for children and adults",
        category: "Prevention",
        urgent: false,
        popular: true,
    },
    Topic {
        id: TopicId::DiseaseSymptoms,
        title: "Disease Symptoms",
        description: "Recognize symptoms of common diseases like dengue, malaria",
        category: "Health Alert",
        urgent: true,
        popular: false,
    },
    Topic {
        id: TopicId::PreventiveCare,
        title: "Preventive Care",
        description: "Daily health habits and seasonal disease prevention",
        category: "Wellness",
        urgent: false,
        popular: false,
    },
    Topic {
        id: TopicId::MaternalChild,
        title: "Mother & Child Health",
        description: "Pregnancy care, newborn health, and nutrition",
        category: "Family Health",
        urgent: false,
        popular: false,
    },
    Topic {
        id: TopicId::EmergencySigns,
        title: "Emergency Warning Signs",
        description: "When to seek immediate medical attention",
        category: "Emergency",
        urgent: true,
        popular: false,
    },
    Topic {
        id: TopicId::Nutrition,
        title: "Nutrition & Diet",
        description: "Healthy eating for disease prevention",
        category: "Wellness",
        urgent: false,
        popular: false,
    },
];

const HINDI: [Topic; 6] = [
    Topic {
        id: TopicId::Vaccination,
        title: "टीकाकरण कार्यक्रम",
        description: "बच्चों और बड़ों के लिए पूरी टीकाकरण तालिका",
        category: "रोकथाम",
        urgent: false,
        popular: true,
    },
    Topic {
        id: TopicId::DiseaseSymptoms,
        title: "बीमारी के लक्षण",
        description: "डेंगू, मलेरिया जैसी आम बीमारियों के लक्षण पहचानें",
        category: "स्वास्थ्य चेतावनी",
        urgent: true,
        popular: false,
    },
    Topic {
        id: TopicId::PreventiveCare,
        title: "बचाव की देखभाल",
        description: "दैनिक स्वास्थ्य आदतें और मौसमी बीमारियों से बचाव",
        category: "कल्याण",
        urgent: false,
        popular: false,
    },
    Topic {
        id: TopicId::MaternalChild,
        title: "मां और बच्चे का स्वास्थ्य",
        description: "गर्भावस्था की देखभाल, नवजात स्वास्थ्य और पोषण",
        category: "पारिवारिक स्वास्थ्य",
        urgent: false,
        popular: false,
    },
    Topic {
        id: TopicId::EmergencySigns,
        title: "आपातकालीन चेतावनी के संकेत",
        description: "कब तुरंत चिकित्सा सहायता लेनी चाहिए",
        category: "आपातकाल",
        urgent: true,
        popular: false,
    },
    Topic {
        id: TopicId::Nutrition,
        title: "पोषण और आहार",
        description: "बीमारी की रोकथाम के लिए स्वस्थ भोजन",
        category: "कल्याण",
        urgent: false,
        popular: false,
    },
];

/// Topic cards for `language` in display order. Languages without
/// translated content get the English cards.
pub fn topics(language: Language) -> &'static [Topic] {
    match language.response_language() {
        Language::Hindi => &HINDI,
        _ => &ENGLISH,
    }
}

pub fn find_topic(language: Language, id: TopicId) -> &'static Topic {
    // Every catalogue holds every id, in `TopicId::ALL` order.
    let index = TopicId::ALL.iter().position(|t| *t == id).unwrap_or(0);
    &topics(language)[index]
}
