/// Text shown when a job has no usable description.
pub const EMPTY_DESCRIPTION: &str = "No description available.";

const HEADING_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionBlock {
    Heading(String),
    Paragraph(Vec<String>),
}

/// Splits a free-text job description into headings and paragraphs.
///
/// Blocks are separated by blank lines. A short block without a period that
/// ends in `:` is a heading ("Requirements:"). Everything else is a paragraph
/// keeping its original line breaks.
pub fn format_description(description: Option<&str>) -> Vec<DescriptionBlock> {
    let Some(text) = description else {
        return Vec::new();
    };
    let normalized = text.replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            if is_heading(block) {
                DescriptionBlock::Heading(block.to_string())
            } else {
                DescriptionBlock::Paragraph(
                    block
                        .lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty())
                        .map(ToOwned::to_owned)
                        .collect(),
                )
            }
        })
        .collect()
}

fn is_heading(block: &str) -> bool {
    block.chars().count() < HEADING_MAX_CHARS && !block.contains('.') && block.ends_with(':')
}
