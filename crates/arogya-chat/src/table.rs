//! Bilingual canned-response table.
//!
//! The table is typed: each supported language has one struct with a field
//! per topic, so a missing topic is a parse error rather than a runtime
//! lookup miss. Construction validates that no entry is blank.

use std::fmt;
use std::path::Path;

use arogya_core::types::Language;
use serde::{Deserialize, Serialize};

use crate::error::ChatError;

/// Keys of the canned responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicKey {
    Greeting,
    VaccinationSchedule,
    DengueSymptoms,
    PreventDiseases,
    WhyVaccinesImportant,
    Default,
}

impl TopicKey {
    pub const ALL: [TopicKey; 6] = [
        TopicKey::Greeting,
        TopicKey::VaccinationSchedule,
        TopicKey::DengueSymptoms,
        TopicKey::PreventDiseases,
        TopicKey::WhyVaccinesImportant,
        TopicKey::Default,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TopicKey::Greeting => "greeting",
            TopicKey::VaccinationSchedule => "vaccination_schedule",
            TopicKey::DengueSymptoms => "dengue_symptoms",
            TopicKey::PreventDiseases => "prevent_diseases",
            TopicKey::WhyVaccinesImportant => "why_vaccines_important",
            TopicKey::Default => "default",
        }
    }
}

impl fmt::Display for TopicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All canned responses for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageResponses {
    pub greeting: String,
    pub vaccination_schedule: String,
    pub dengue_symptoms: String,
    pub prevent_diseases: String,
    pub why_vaccines_important: String,
    pub default: String,
}

impl LanguageResponses {
    pub fn get(&self, key: TopicKey) -> &str {
        match key {
            TopicKey::Greeting => &self.greeting,
            TopicKey::VaccinationSchedule => &self.vaccination_schedule,
            TopicKey::DengueSymptoms => &self.dengue_symptoms,
            TopicKey::PreventDiseases => &self.prevent_diseases,
            TopicKey::WhyVaccinesImportant => &self.why_vaccines_important,
            TopicKey::Default => &self.default,
        }
    }

    fn validate(&self, language: Language) -> Result<(), ChatError> {
        for topic in TopicKey::ALL {
            if self.get(topic).trim().is_empty() {
                return Err(ChatError::EmptyEntry { language, topic });
            }
        }
        Ok(())
    }
}

/// Read-only response table covering every supported language.
///
/// On disk this is a TOML document with one table per language code:
///
/// ```toml
/// [en]
/// greeting = "Hello!"
/// vaccination_schedule = "..."
/// # ...
///
/// [hi]
/// greeting = "नमस्ते!"
/// # ...
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseTable {
    #[serde(rename = "en")]
    english: LanguageResponses,
    #[serde(rename = "hi")]
    hindi: LanguageResponses,
}

impl Default for ResponseTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ResponseTable {
    /// Build a table from per-language responses, rejecting blank entries.
    pub fn new(english: LanguageResponses, hindi: LanguageResponses) -> Result<Self, ChatError> {
        let table = Self { english, hindi };
        table.validate()?;
        Ok(table)
    }

    /// The content shipped with the assistant.
    pub fn builtin() -> Self {
        Self {
            english: builtin_english(),
            hindi: builtin_hindi(),
        }
    }

    /// Parse and validate a table from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ChatError> {
        let table: ResponseTable = toml::from_str(content)?;
        table.validate()?;
        Ok(table)
    }

    /// Load and validate a table from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ChatError> {
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), "Response table loaded");
        Ok(table)
    }

    /// Check every supported language has every topic filled in.
    pub fn validate(&self) -> Result<(), ChatError> {
        for language in Language::SUPPORTED {
            self.responses(language).validate(language)?;
        }
        Ok(())
    }

    /// Responses for `language`, falling back to English for languages
    /// without content.
    pub fn responses(&self, language: Language) -> &LanguageResponses {
        match language.response_language() {
            Language::Hindi => &self.hindi,
            _ => &self.english,
        }
    }

    pub fn get(&self, language: Language, key: TopicKey) -> &str {
        self.responses(language).get(key)
    }
}

fn builtin_english() -> LanguageResponses {
    LanguageResponses {
        greeting: "Hello! I am your health assistant. I can provide information about \
                   vaccination, disease symptoms, and health tips."
            .to_string(),
        vaccination_schedule: "Children should get vaccinated according to India's National \
                               Immunization Schedule:\n\n\
                               • At birth: BCG, OPV-0, Hepatitis B-0\n\
                               • 6 weeks: OPV-1, DPT-1, Hepatitis B-1, Hib-1\n\
                               • 10 weeks: OPV-2, DPT-2, Hib-2\n\
                               • 14 weeks: OPV-3, DPT-3, Hib-3\n\
                               • 9 months: Measles-1, JE-1\n\n\
                               💡 Visit your nearest government health center for free vaccines."
            .to_string(),
        dengue_symptoms: "Dengue symptoms include:\n\n\
                          • Sudden high fever\n\
                          • Severe headache\n\
                          • Pain behind eyes\n\
                          • Muscle and joint pain\n\
                          • Red rash on skin\n\n\
                          ⚠️ If you have these symptoms, go to a hospital immediately."
            .to_string(),
        prevent_diseases: "To prevent seasonal diseases:\n\n\
                           • Drink clean, boiled water\n\
                           • Wash hands with soap before eating\n\
                           • Use mosquito nets\n\
                           • Cover stored water\n\
                           • Eat fresh fruits and vegetables\n\
                           • Avoid outside food during monsoon"
            .to_string(),
        why_vaccines_important: "Vaccines protect against life-threatening diseases like polio, \
                                 measles, TB, diphtheria, and whooping cough. They save lives \
                                 and are free at government hospitals."
            .to_string(),
        default: "I can help you with vaccination schedules, disease symptoms, and preventive \
                  healthcare tips. Please ask me about specific health topics.\n\n\
                  ⚠️ This information is for awareness only. For medical advice, please \
                  consult a doctor."
            .to_string(),
    }
}

fn builtin_hindi() -> LanguageResponses {
    LanguageResponses {
        greeting: "नमस्ते! मैं आपका स्वास्थ्य सहायक हूं। मैं टीकाकरण, बीमारियों के लक्षण और \
                   स्वास्थ्य सुझावों के बारे में जानकारी दे सकता हूं।"
            .to_string(),
        vaccination_schedule: "बच्चों को भारत के राष्ट्रीय टीकाकरण कार्यक्रम के अनुसार टीके \
                               लगवाने चाहिए:\n\n\
                               • जन्म के समय: बीसीजी, ओपीवी-0, हेपेटाइटिस बी-0\n\
                               • 6 सप्ताह: ओपीवी-1, डीपीटी-1, हेपेटाइटिस बी-1, हिब-1\n\
                               • 10 सप्ताह: ओपीवी-2, डीपीटी-2, हिब-2\n\
                               • 14 सप्ताह: ओपीवी-3, डीपीटी-3, हिब-3\n\
                               • 9 महीने: खसरा-1, जेई-1\n\n\
                               💡 मुफ्त टीके के लिए अपने नजदीकी सरकारी स्वास्थ्य केंद्र जाएं।"
            .to_string(),
        dengue_symptoms: "डेंगू के लक्षण:\n\n\
                          • अचानक तेज बुखार\n\
                          • सिर में तेज दर्द\n\
                          • आंखों के पीछे दर्द\n\
                          • मांसपेशियों और जोड़ों में दर्द\n\
                          • त्वचा पर लाल चकत्ते\n\n\
                          ⚠️ यदि आपमें ये लक्षण हैं, तुरंत अस्पताल जाएं।"
            .to_string(),
        prevent_diseases: "मौसमी बीमारियों से बचने के लिए:\n\n\
                           • साफ, उबला हुआ पानी पिएं\n\
                           • खाने से पहले साबुन से हाथ धोएं\n\
                           • मच्छरदानी का उपयोग करें\n\
                           • पानी को ढककर रखें\n\
                           • ताजे फल और सब्जियां खाएं\n\
                           • बारिश में बाहर का खाना न खाएं"
            .to_string(),
        why_vaccines_important: "टीके पोलियो, खसरा, टीबी, डिप्थीरिया और काली खांसी जैसी \
                                 जानलेवा बीमारियों से बचाते हैं। ये जीवन बचाते हैं और सरकारी \
                                 अस्पतालों में मुफ्त मिलते हैं।"
            .to_string(),
        default: "मैं आपकी टीकाकरण अनुसूची, बीमारी के लक्षण और स्वास्थ्य सुझावों में मदद कर \
                  सकता हूं। कृपया मुझसे स्वास्थ्य विषयों के बारे में पूछें।\n\n\
                  ⚠️ यह जानकारी केवल जागरूकता के लिए है। चिकित्सा सलाह के लिए कृपया डॉक्टर \
                  से सलाह लें।"
            .to_string(),
    }
}
