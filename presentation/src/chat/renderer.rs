//! Transcript rendering
//!
//! A pure projection of the transcript to text. Rendering never touches
//! the transcript, so rendering it twice yields the same output.

use wizard_domain::{ChartImage, Message, Payload, Role, Transcript};

/// Caption shown in place of a chart image
pub const CHART_CAPTION: &str = "Generated Chart";

pub struct ChatRenderer;

impl ChatRenderer {
    /// Render every message, newest first, separated by blank lines.
    pub fn render(transcript: &Transcript) -> String {
        transcript
            .iter()
            .map(Self::render_message)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn render_message(message: &Message) -> String {
        let label = match message.role() {
            Role::User => "You",
            Role::Assistant => "DataWizard",
        };
        match message.payload() {
            Payload::Text(text) if text.contains('\n') => format!("{}:\n{}", label, text),
            Payload::Text(text) => format!("{}: {}", label, text),
            Payload::Image(image) => format!("{}: {}", label, Self::image_placeholder(image)),
        }
    }

    fn image_placeholder(image: &ChartImage) -> String {
        format!(
            "[{}] {}x{} PNG, {} bytes",
            CHART_CAPTION,
            image.width(),
            image.height(),
            image.byte_len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(messages: Vec<Message>) -> Transcript {
        let mut transcript = Transcript::default();
        for message in messages {
            transcript.append_front(message);
        }
        transcript
    }

    #[test]
    fn test_renders_newest_first() {
        let transcript = transcript(vec![
            Message::user("Q1"),
            Message::assistant_text("A1"),
            Message::user("Q2"),
            Message::assistant_text("A2"),
        ]);

        assert_eq!(
            ChatRenderer::render(&transcript),
            "DataWizard: A2\n\nYou: Q2\n\nDataWizard: A1\n\nYou: Q1"
        );
    }

    #[test]
    fn test_image_has_caption() {
        let message = Message::assistant_image(ChartImage::new(vec![0; 42], 10, 10));
        assert_eq!(
            ChatRenderer::render_message(&message),
            "DataWizard: [Generated Chart] 10x10 PNG, 42 bytes"
        );
    }

    #[test]
    fn test_multiline_text_starts_on_new_line() {
        let message = Message::assistant_text("| a |\n| --- |\n| 1 |");
        assert_eq!(
            ChatRenderer::render_message(&message),
            "DataWizard:\n| a |\n| --- |\n| 1 |"
        );
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let transcript = transcript(vec![
            Message::user("plot sales"),
            Message::assistant_image(ChartImage::new(vec![1, 2, 3], 640, 480)),
        ]);

        let first = ChatRenderer::render(&transcript);
        let second = ChatRenderer::render(&transcript);
        assert_eq!(first, second);
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_empty_transcript() {
        assert_eq!(ChatRenderer::render(&Transcript::default()), "");
    }
}
