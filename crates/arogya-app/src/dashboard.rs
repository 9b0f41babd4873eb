//! Localized dashboard and chat chrome for the terminal host.

use std::fmt::Write;

use arogya_chat::{topics, Topic};
use arogya_core::types::{Language, Message};

/// Fixed dashboard copy for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardText {
    pub hero_title: &'static str,
    pub hero_subtitle: &'static str,
    pub start_chat: &'static str,
    pub children_vaccinated: &'static str,
    pub health_centers: &'static str,
    pub awareness_sessions: &'static str,
    pub emergency_helpline: &'static str,
    pub topics_heading: &'static str,
    pub topics_hint: &'static str,
    pub emergency_title: &'static str,
    pub emergency_body: &'static str,
    pub disclaimer: &'static str,
    pub collaboration: &'static str,
    pub popular: &'static str,
    pub urgent: &'static str,
    pub learn_more: &'static str,
    pub back: &'static str,
    pub assistant_title: &'static str,
    pub assistant_subtitle: &'static str,
    pub input_hint: &'static str,
    pub chat_disclaimer: &'static str,
}

const ENGLISH: DashboardText = DashboardText {
    hero_title: "AI Health Assistant",
    hero_subtitle: "Vaccination, disease prevention, and health awareness for rural and \
                    semi-urban communities",
    start_chat: "Start Chat Now",
    children_vaccinated: "Children Vaccinated",
    health_centers: "Health Centers",
    awareness_sessions: "Awareness Sessions",
    emergency_helpline: "Emergency Helpline",
    topics_heading: "Health Topics",
    topics_hint: "Click on any topic to get information",
    emergency_title: "Medical Emergency?",
    emergency_body: "Call 102 immediately or visit the nearest hospital",
    disclaimer: "⚠️ This information is for awareness only. Please consult a doctor for \
                 medical advice.",
    collaboration: "In collaboration with Ministry of Health, Government of India",
    popular: "Popular",
    urgent: "Urgent",
    learn_more: "Learn More",
    back: "Back",
    assistant_title: "Health Assistant",
    assistant_subtitle: "Here to help with your health queries",
    input_hint: "Type your health question...",
    chat_disclaimer: "⚠️ This information is for awareness only. Consult a doctor for \
                      medical advice.",
};

const HINDI: DashboardText = DashboardText {
    hero_title: "स्वास्थ्य सहायक AI",
    hero_subtitle: "ग्रामीण और अर्ध-शहरी क्षेत्रों के लिए टीकाकरण, बीमारी की रोकथाम और स्वास्थ्य \
                    जागरूकता",
    start_chat: "अभी चैट करें",
    children_vaccinated: "टीकाकृत बच्चे",
    health_centers: "स्वास्थ्य केंद्र",
    awareness_sessions: "जागरूकता सत्र",
    emergency_helpline: "आपातकालीन हेल्पलाइन",
    topics_heading: "स्वास्थ्य विषय",
    topics_hint: "जानकारी प्राप्त करने के लिए किसी भी विषय पर क्लिक करें",
    emergency_title: "आपातकालीन स्थिति?",
    emergency_body: "तुरंत 102 पर कॉल करें या नजदीकी अस्पताल जाएं",
    disclaimer: "⚠️ यह जानकारी केवल जागरूकता के लिए है। चिकित्सा सलाह के लिए डॉक्टर से सलाह लें।",
    collaboration: "स्वास्थ्य मंत्रालय, भारत सरकार के सहयोग से",
    popular: "लोकप्रिय",
    urgent: "जरूरी",
    learn_more: "जानें",
    back: "वापस",
    assistant_title: "स्वास्थ्य सहायक",
    assistant_subtitle: "आपकी स्वास्थ्य जानकारी के लिए यहां हूं",
    input_hint: "अपना सवाल लिखें...",
    chat_disclaimer: "⚠️ यह जानकारी केवल जागरूकता के लिए है। चिकित्सा सलाह के लिए डॉक्टर से सलाह \
                      लें।",
};

/// Headline figures shown under the hero.
pub const QUICK_STATS: [&str; 4] = ["2.5M+", "15,000+", "50,000+", "102"];

impl DashboardText {
    /// Copy for `language`; languages without translations get English.
    pub fn for_language(language: Language) -> &'static DashboardText {
        match language.response_language() {
            Language::Hindi => &HINDI,
            _ => &ENGLISH,
        }
    }

    fn stat_labels(&self) -> [&'static str; 4] {
        [
            self.children_vaccinated,
            self.health_centers,
            self.awareness_sessions,
            self.emergency_helpline,
        ]
    }
}

/// One topic card, as shown in the dashboard list.
pub fn render_topic_card(topic: &Topic, text: &DashboardText) -> String {
    let mut out = String::new();
    let mut badges = Vec::new();
    if topic.popular {
        badges.push(text.popular);
    }
    if topic.urgent {
        badges.push(text.urgent);
    }
    let _ = write!(out, "  [{}] {}", topic.id, topic.title);
    if !badges.is_empty() {
        let _ = write!(out, "  ({})", badges.join(", "));
    }
    let _ = write!(
        out,
        "\n      {}\n      {} · {} → /topic {}",
        topic.description, topic.category, text.learn_more, topic.id
    );
    out
}

/// The full dashboard view.
pub fn render_dashboard(language: Language) -> String {
    let text = DashboardText::for_language(language);
    let mut out = String::new();

    let _ = writeln!(out, "=== {} ===", text.hero_title);
    let _ = writeln!(out, "{}", text.hero_subtitle);
    let _ = writeln!(out, "{} → /chat", text.start_chat);
    let _ = writeln!(out);

    for (value, label) in QUICK_STATS.iter().zip(text.stat_labels()) {
        let _ = writeln!(out, "  {:>8}  {}", value, label);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "--- {} ---", text.topics_heading);
    let _ = writeln!(out, "{}", text.topics_hint);
    for topic in topics(language) {
        let _ = writeln!(out, "{}", render_topic_card(topic, text));
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "!!! {} {}", text.emergency_title, text.emergency_body);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", text.disclaimer);
    let _ = write!(out, "{}", text.collaboration);
    out
}

/// Header printed when the chat view opens.
pub fn render_chat_header(language: Language) -> String {
    let text = DashboardText::for_language(language);
    format!(
        "=== {} ===\n{}\n({}: /dashboard)\n{}",
        text.assistant_title, text.assistant_subtitle, text.back, text.chat_disclaimer
    )
}

pub fn render_message(message: &Message) -> String {
    let who = if message.is_user { "you" } else { "arogya" };
    let time = message.timestamp.format("%H:%M");
    format!("[{}] {:>6}> {}", time, who, message.text)
}

/// Language list with the current selection marked.
pub fn render_languages(current: Language) -> String {
    Language::ALL
        .iter()
        .map(|l| {
            let marker = if *l == current { '*' } else { ' ' };
            let popular = if l.is_popular() { " ★" } else { "" };
            let limited = if l.is_supported() { "" } else { " (replies in English)" };
            format!(
                "{} {}  {} / {}{}{}",
                marker,
                l.code(),
                l.name(),
                l.native_name(),
                popular,
                limited
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
