//! Default content inserted into an empty database

use crate::domain::entity::{NewModule, NewScheme};

pub fn default_modules() -> Vec<NewModule> {
    vec![
        NewModule {
            title: "Digital Banking Basics".to_string(),
            title_tamil: Some("டிஜிட்டல் வங்கி அடிப்படைகள்".to_string()),
            description: "Learn about online banking, UPI payments, and digital financial services"
                .to_string(),
            description_tamil: Some(
                "ஆன்லைன் வங்கி, UPI பணம் செலுத்துதல் மற்றும் டிஜிட்டல் நிதி சேவைகள் பற்றி அறியுங்கள்"
                    .to_string(),
            ),
            category: "banking".to_string(),
            video_url: Some(
                "https://sample-videos.com/zip/10/mp4/SampleVideo_1280x720_1mb.mp4".to_string(),
            ),
            pdf_url: None,
            duration: Some(300),
            is_active: true,
        },
        NewModule {
            title: "Smartphone Basics".to_string(),
            title_tamil: Some("ஸ்மார்ட்போன் அடிப்படைகள்".to_string()),
            description: "Make calls, send messages, take photos and install apps".to_string(),
            description_tamil: Some(
                "அழைப்புகள், செய்திகள், புகைப்படங்கள் மற்றும் செயலிகளைப் பயன்படுத்த கற்றுக்கொள்ளுங்கள்"
                    .to_string(),
            ),
            category: "basics".to_string(),
            video_url: None,
            pdf_url: None,
            duration: Some(240),
            is_active: true,
        },
        NewModule {
            title: "Staying Safe Online".to_string(),
            title_tamil: Some("இணையத்தில் பாதுகாப்பாக இருத்தல்".to_string()),
            description: "Spot fraud calls and fake messages, and never share your OTP".to_string(),
            description_tamil: Some(
                "மோசடி அழைப்புகள், போலி செய்திகளை அடையாளம் கண்டு உங்கள் OTP-ஐப் பாதுகாக்கவும்"
                    .to_string(),
            ),
            category: "safety".to_string(),
            video_url: None,
            pdf_url: None,
            duration: Some(360),
            is_active: true,
        },
    ]
}

pub fn default_schemes() -> Vec<NewScheme> {
    vec![
        NewScheme {
            name: "PM-KISAN".to_string(),
            name_tamil: Some("பிஎம்-கிசான்".to_string()),
            description: "Income support of ₹6,000 a year for small and marginal farmers, paid in three instalments"
                .to_string(),
            description_tamil: Some(
                "சிறு மற்றும் குறு விவசாயிகளுக்கு ஆண்டுக்கு ₹6,000 வருமான ஆதரவு, மூன்று தவணைகளில்"
                    .to_string(),
            ),
            category: "agriculture".to_string(),
            eligibility: "Farmer families owning cultivable land".to_string(),
            amount: Some("₹6,000 per year".to_string()),
            application_url: Some("https://pmkisan.gov.in".to_string()),
        },
        NewScheme {
            name: "Pradhan Mantri Jan Dhan Yojana".to_string(),
            name_tamil: Some("பிரதமர் ஜன் தன் யோஜனா".to_string()),
            description: "Zero-balance bank account with a RuPay debit card and accident insurance"
                .to_string(),
            description_tamil: Some(
                "ரூபே டெபிட் கார்டு மற்றும் விபத்துக் காப்பீட்டுடன் குறைந்தபட்ச இருப்பு இல்லாத வங்கிக் கணக்கு"
                    .to_string(),
            ),
            category: "banking".to_string(),
            eligibility: "Any Indian citizen aged 10 or above without a bank account".to_string(),
            amount: None,
            application_url: Some("https://pmjdy.gov.in".to_string()),
        },
    ]
}
