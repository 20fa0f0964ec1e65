use crate::domain::{EntityKind, EntitySet, IngestSummary, Language};

/// Canned replies in one display language.
pub struct Texts {
    pub welcome: &'static str,
    pub help: &'static str,
    pub no_doc: &'static str,
    pub processing: &'static str,
    pub thinking: &'static str,
    pub doc_processed: &'static str,
    pub doc_cleared: &'static str,
    pub lang_set: &'static str,
}

pub fn texts(language: Language) -> &'static Texts {
    match language {
        Language::English => &ENGLISH,
        Language::Hindi => &HINDI,
        Language::Bengali => &BENGALI,
    }
}

static ENGLISH: Texts = Texts {
    welcome: "Welcome to ShastraAI - Legal Document Analysis Bot!

I can help you analyze legal documents using AI. Here's what I can do:

Upload Document: Send me a PDF or DOCX file (up to 10MB)
Extract Entities: Use /entities to find parties, amounts, dates, terms
Get Amounts: Use /amounts to see all monetary values
Get Dates: Use /dates to see all important dates
Get Deadlines: Use /deadlines to see critical deadlines
Ask Questions: Use /ask <question> to ask about your document
Language: Use /lang to change language (English/Hindi/Bengali)
Get Help: Use /help for all commands

How to use:
1. Send me a PDF or DOCX document
2. I'll process it with AI
3. Use specific commands to extract information
4. Use /ask to ask questions

Example: /ask What is the rent amount?

Ready to analyze your legal documents!",
    help: "ShastraAI Bot Commands:

/upload - Upload a PDF or DOCX document
/entities - Extract all entities from document
/amounts - Show all monetary amounts
/dates - Show all important dates
/deadlines - Show critical deadlines
/ask <question> - Ask a question about document
/lang - Change language (English/Hindi/Bengali)
/clear - Clear current document
/start - Show welcome message
/help - Show this help

Note: Documents are stored per user session.",
    no_doc: "No document found. Please upload a document first using /upload or send me a file.",
    processing: "Processing your document...",
    thinking: "Thinking about your question...",
    doc_processed: "Document processed successfully!",
    doc_cleared: "Document cleared from memory.",
    lang_set: "Language set to: English",
};

static HINDI: Texts = Texts {
    welcome: "ShastraAI में आपका स्वागत है - कानूनी दस्तावेज़ विश्लेषण बॉट!

मैं AI का उपयोग करके कानूनी दस्तावेज़ों का विश्लेषण करने में आपकी सहायता कर सकता हूं। यहाँ मैं क्या कर सकता हूं:

दस्तावेज़ अपलोड करें: मुझे PDF या DOCX फ़ाइल भेजें (10MB तक)
संस्थाएं निकालें: पार्टियों, राशियों, तारीखों को खोजने के लिए /entities का उपयोग करें
राशियां देखें: सभी मौद्रिक मूल्य देखने के लिए /amounts का उपयोग करें
तारीखें देखें: सभी महत्वपूर्ण तारीखें देखने के लिए /dates का उपयोग करें
समय सीमाएं देखें: महत्वपूर्ण समय सीमाएं देखने के लिए /deadlines का उपयोग करें
प्रश्न पूछें: अपने दस्तावेज़ के बारे में प्रश्न पूछने के लिए /ask <प्रश्न> का उपयोग करें
भाषा: भाषा बदलने के लिए /lang का उपयोग करें (English/Hindi/Bengali)
सहायता: सभी कमांड के लिए /help का उपयोग करें

उपयोग कैसे करें:
1. मुझे PDF या DOCX दस्तावेज़ भेजें
2. मैं इसे AI के साथ प्रोसेस करूंगा
3. जानकारी निकालने के लिए विशिष्ट कमांड का उपयोग करें
4. प्रश्न पूछने के लिए /ask का उपयोग करें

उदाहरण: /ask किराया राशि क्या है?

आपके कानूनी दस्तावेज़ों का विश्लेषण करने के लिए तैयार!",
    help: "ShastraAI बॉट कमांड:

/upload - PDF या DOCX दस्तावेज़ अपलोड करें
/entities - दस्तावेज़ से सभी संस्थाएं निकालें
/amounts - सभी मौद्रिक राशियां दिखाएं
/dates - सभी महत्वपूर्ण तारीखें दिखाएं
/deadlines - महत्वपूर्ण समय सीमाएं दिखाएं
/ask <प्रश्न> - दस्तावेज़ के बारे में प्रश्न पूछें
/lang - भाषा बदलें (English/Hindi/Bengali)
/clear - वर्तमान दस्तावेज़ साफ़ करें
/start - स्वागत संदेश दिखाएं
/help - यह सहायता दिखाएं

नोट: दस्तावेज़ प्रति उपयोगकर्ता सत्र में संग्रहीत हैं।",
    no_doc: "कोई दस्तावेज़ नहीं मिला। कृपया पहले दस्तावेज़ अपलोड करें।",
    processing: "दस्तावेज़ प्रोसेस हो रहा है...",
    thinking: "आपके प्रश्न के बारे में सोच रहा हूं...",
    doc_processed: "दस्तावेज़ सफलतापूर्वक प्रोसेस हो गया!",
    doc_cleared: "दस्तावेज़ मेमोरी से साफ़ हो गया।",
    lang_set: "भाषा सेट की गई: हिंदी",
};

static BENGALI: Texts = Texts {
    welcome: "ShastraAI-এ আপনাকে স্বাগতম - আইনি নথি বিশ্লেষণ বট!

আমি AI ব্যবহার করে আপনার আইনি নথি বিশ্লেষণ করতে সাহায্য করতে পারি। আমি কী করতে পারি:

নথি আপলোড: আমাকে PDF বা DOCX ফাইল পাঠান (10MB পর্যন্ত)
সত্তা বের করুন: পক্ষ, পরিমাণ, তারিখ খুঁজতে /entities ব্যবহার করুন
পরিমাণ দেখুন: সমস্ত আর্থিক মূল্য দেখতে /amounts ব্যবহার করুন
তারিখ দেখুন: সমস্ত গুরুত্বপূর্ণ তারিখ দেখতে /dates ব্যবহার করুন
সময়সীমা দেখুন: গুরুত্বপূর্ণ সময়সীমা দেখতে /deadlines ব্যবহার করুন
প্রশ্ন জিজ্ঞাসা: আপনার নথি সম্পর্কে প্রশ্ন জিজ্ঞাসা করতে /ask <প্রশ্ন> ব্যবহার করুন
ভাষা: ভাষা পরিবর্তন করতে /lang ব্যবহার করুন (English/Hindi/Bengali)
সাহায্য: সমস্ত কমান্ডের জন্য /help ব্যবহার করুন

কীভাবে ব্যবহার করবেন:
1. আমাকে PDF বা DOCX নথি পাঠান
2. আমি এটিকে AI দিয়ে প্রক্রিয়া করব
3. তথ্য বের করতে নির্দিষ্ট কমান্ড ব্যবহার করুন
4. প্রশ্ন জিজ্ঞাসা করতে /ask ব্যবহার করুন

উদাহরণ: /ask ভাড়ার পরিমাণ কত?

আপনার আইনি নথি বিশ্লেষণ করতে প্রস্তুত!",
    help: "ShastraAI বট কমান্ড:

/upload - PDF বা DOCX নথি আপলোড করুন
/entities - নথি থেকে সমস্ত সত্তা বের করুন
/amounts - সমস্ত আর্থিক পরিমাণ দেখান
/dates - সমস্ত গুরুত্বপূর্ণ তারিখ দেখান
/deadlines - গুরুত্বপূর্ণ সময়সীমা দেখান
/ask <প্রশ্ন> - নথি সম্পর্কে প্রশ্ন জিজ্ঞাসা করুন
/lang - ভাষা পরিবর্তন করুন (English/Hindi/Bengali)
/clear - বর্তমান নথি সাফ করুন
/start - স্বাগত বার্তা দেখান
/help - এই সাহায্য দেখান

নোট: নথি প্রতি ব্যবহারকারী সেশনে সংরক্ষিত।",
    no_doc: "কোন নথি পাওয়া যায়নি। অনুগ্রহ করে প্রথমে নথি আপলোড করুন।",
    processing: "নথি প্রক্রিয়াকরণ হচ্ছে...",
    thinking: "আপনার প্রশ্ন নিয়ে চিন্তা করছি...",
    doc_processed: "নথি সফলভাবে প্রক্রিয়াকরণ হয়েছে!",
    doc_cleared: "নথি মেমরি থেকে সাফ হয়েছে।",
    lang_set: "ভাষা সেট করা হয়েছে: বাংলা",
};

pub const FILE_TOO_LARGE: &str = "File too large. Please send a file smaller than 10MB.";
pub const UNSUPPORTED_FILE: &str = "Unsupported file type. Please send a PDF or DOCX file.";
pub const UPLOAD_PROMPT: &str =
    "Please send me a PDF or DOCX file to analyze. I support files up to 10MB.";
pub const ASK_USAGE: &str = "Please provide a question. Example: /ask What is the rent amount?";
pub const SETUP_DONE: &str = "Bot commands menu has been set up!";
pub const SETUP_FAILED: &str = "Failed to set up the bot commands menu. Please try again.";
pub const GENERIC_FAILURE: &str = "An error occurred. Please try again.";

pub const DEADLINES_QUESTION: &str = "What are the important deadlines, due dates, or time-sensitive obligations mentioned in this document? Please list all critical dates with their purposes.";

const ENTITIES_HEADER: &str = "EXTRACTED ENTITIES\n\n";

fn section_title(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Parties => "PARTIES:",
        EntityKind::Amounts => "MONETARY AMOUNTS:",
        EntityKind::Dates => "DATES & DEADLINES:",
        EntityKind::Terms => "KEY TERMS:",
    }
}

/// All four entity sections as a bulleted message; empty sections are left
/// out.
pub fn format_entities(entities: &EntitySet) -> String {
    let sections: Vec<String> = EntityKind::ALL
        .iter()
        .filter(|kind| !entities.get(**kind).is_empty())
        .map(|kind| {
            let bullets: String = entities
                .get(*kind)
                .iter()
                .map(|value| format!("• {}\n", value))
                .collect();
            format!("{}\n{}", section_title(*kind), bullets)
        })
        .collect();

    if sections.is_empty() {
        return format!("{}No entities found in the document.", ENTITIES_HEADER);
    }

    format!("{}{}", ENTITIES_HEADER, sections.join("\n"))
        .trim_end()
        .to_string()
}

/// Numbered list of a single entity kind, e.g. for `/amounts`.
pub fn format_entity_list(kind: EntityKind, values: &[String]) -> String {
    if values.is_empty() {
        return match kind {
            EntityKind::Amounts => "No monetary amounts found in the document.".to_string(),
            EntityKind::Dates => "No dates found in the document.".to_string(),
            EntityKind::Parties => "No parties found in the document.".to_string(),
            EntityKind::Terms => "No key terms found in the document.".to_string(),
        };
    }

    let title = match kind {
        EntityKind::Amounts => "MONETARY AMOUNTS FOUND:",
        EntityKind::Dates => "DATES FOUND:",
        EntityKind::Parties => "PARTIES FOUND:",
        EntityKind::Terms => "KEY TERMS FOUND:",
    };

    let list = values
        .iter()
        .enumerate()
        .map(|(index, value)| format!("{}. {}", index + 1, value))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n\n{}", title, list)
}

pub fn extracting_kind(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Amounts => "Extracting monetary amounts...",
        EntityKind::Dates => "Extracting dates...",
        EntityKind::Parties | EntityKind::Terms => "Extracting entities from your document...",
    }
}

pub fn format_ingest_summary(language: Language, summary: &IngestSummary) -> String {
    format!(
        "{}\n\n\
         Extracted {} chunks\n\
         Found {} parties, {} amounts, {} dates\n\n\
         Now you can:\n\
         • Use /entities to see detailed extraction\n\
         • Use /amounts to see monetary values\n\
         • Use /dates to see important dates\n\
         • Use /deadlines to see critical deadlines\n\
         • Use /ask <question> to ask questions\n\
         • Use /help for more commands",
        texts(language).doc_processed,
        summary.chunks,
        summary.entities.parties.len(),
        summary.entities.amounts.len(),
        summary.entities.dates.len(),
    )
}

pub fn format_answer(answer: &str) -> String {
    format!("Answer:\n\n{}", answer)
}

pub fn format_deadlines(answer: &str) -> String {
    format!("CRITICAL DEADLINES & DUE DATES:\n\n{}", answer)
}

fn language_menu() -> String {
    Language::ALL
        .iter()
        .map(|language| format!("• /lang {} - {}", language.code(), language.native_name()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn current_language(language: Language) -> String {
    format!(
        "Current language: {}\n\nAvailable languages:\n{}",
        language.native_name(),
        language_menu()
    )
}

pub fn unknown_language() -> String {
    format!(
        "Available languages:\n{}\n\nUsage: /lang en",
        language_menu()
    )
}
