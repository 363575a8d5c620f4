use crate::catalog::DEFAULT_STYLE;
use crate::providers::locale_of;
use crate::request::SynthesisCall;

const SPEAK_NS: &str = "http://www.w3.org/2001/10/synthesis";
const MSTTS_NS: &str = "http://www.w3.org/2001/mstts";

/// Render the SSML document for one synthesis call.
///
/// `xml:lang` is taken from the voice id's locale.
pub fn build_ssml(call: &SynthesisCall) -> String {
    let lang = escape_xml(locale_of(&call.voice_id));
    let voice = escape_xml(&call.voice_id);
    let prosody = format!(
        "<prosody rate=\"{}\" pitch=\"{}\">{}</prosody>",
        escape_xml(&call.rate),
        escape_xml(&call.pitch),
        escape_xml(&call.text)
    );

    if call.style == DEFAULT_STYLE {
        format!(
            "<speak version=\"1.0\" xmlns=\"{SPEAK_NS}\" xml:lang=\"{lang}\">\
             <voice name=\"{voice}\">{prosody}</voice></speak>"
        )
    } else {
        format!(
            "<speak version=\"1.0\" xmlns=\"{SPEAK_NS}\" xmlns:mstts=\"{MSTTS_NS}\" xml:lang=\"{lang}\">\
             <voice name=\"{voice}\"><mstts:express-as style=\"{}\">{prosody}</mstts:express-as></voice></speak>",
            escape_xml(&call.style)
        )
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
