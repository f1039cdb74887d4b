//! Card layout: places every element of the preview on the 1200x630 canvas

use super::font::{Fonts, Weight};
use super::request::{Glyph, ImageRequest};

pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 630;

const PADDING_X: i32 = 80;
const PADDING_Y: i32 = 60;
const CONTENT_WIDTH: f32 = (WIDTH as i32 - 2 * PADDING_X) as f32;

const GLYPH_SIZE: u32 = 64;
const HEADER_GAP: i32 = 20;
const BLOCK_GAP: i32 = 20;

const LABEL_SIZE: u32 = 24;
const DESCRIPTION_SIZE: u32 = 28;
const DESCRIPTION_MAX_WIDTH: f32 = 900.0;
const WATERMARK_SIZE: u32 = 24;

/// Titles longer than this many characters use the reduced tier
pub const TITLE_REDUCE_AFTER: usize = 40;

pub type Rgb = [u8; 3];

pub const BACKGROUND: Rgb = [0x0a, 0x0a, 0x0f];
const MUTED: Rgb = [0x88, 0x88, 0x88];
const WATERMARK: Rgb = [0x44, 0x44, 0x44];
const TITLE_FROM: Rgb = [0xe9, 0x45, 0x60];
const TITLE_TO: Rgb = [0xff, 0x6b, 0x6b];

/// Title font size tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleTier {
    Large,
    Reduced,
}

impl TitleTier {
    pub fn for_title(title: &str) -> Self {
        if title.chars().count() > TITLE_REDUCE_AFTER {
            TitleTier::Reduced
        } else {
            TitleTier::Large
        }
    }

    pub fn size(&self) -> u32 {
        match self {
            TitleTier::Large => 64,
            TitleTier::Reduced => 48,
        }
    }
}

/// How text pixels are coloured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Solid(Rgb),
    /// Left-to-right gradient across the block width
    Gradient { from: Rgb, to: Rgb },
}

/// Typography shared by every line of a block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: u32,
    pub weight: Weight,
    /// Multiple of the font size
    pub line_height: f32,
    pub letter_spacing: f32,
    pub fill: Fill,
}

impl TextStyle {
    const fn new(size: u32, weight: Weight, line_height: f32, fill: Fill) -> Self {
        Self {
            size,
            weight,
            line_height,
            letter_spacing: 0.0,
            fill,
        }
    }
}

/// Positioned run of text lines
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub x: i32,
    pub y: i32,
    pub size: u32,
    pub weight: Weight,
    pub line_height: u32,
    pub letter_spacing: f32,
    pub fill: Fill,
    /// Width of the widest line
    pub width: f32,
}

impl TextBlock {
    fn new(fonts: &Fonts, style: TextStyle, lines: Vec<String>, x: i32, y: i32) -> Self {
        let width = lines
            .iter()
            .map(|line| fonts.text_width(style.weight, line, style.size, style.letter_spacing))
            .fold(0.0, f32::max);

        Self {
            lines,
            x,
            y,
            size: style.size,
            weight: style.weight,
            line_height: (style.size as f32 * style.line_height).round() as u32,
            letter_spacing: style.letter_spacing,
            fill: style.fill,
            width,
        }
    }

    pub fn height(&self) -> i32 {
        (self.lines.len() as u32 * self.line_height) as i32
    }
}

/// One element of the card
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Glyph {
        glyph: Glyph,
        x: i32,
        y: i32,
        size: u32,
    },
    Label(TextBlock),
    Title {
        tier: TitleTier,
        text: TextBlock,
    },
    Description(TextBlock),
    Watermark(TextBlock),
}

/// Fully laid out preview, ready to rasterize
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub width: u32,
    pub height: u32,
    pub background: Rgb,
    pub nodes: Vec<Node>,
}

impl Card {
    pub fn glyph(&self) -> Option<Glyph> {
        self.nodes.iter().find_map(|node| match node {
            Node::Glyph { glyph, .. } => Some(*glyph),
            _ => None,
        })
    }

    pub fn title_tier(&self) -> Option<TitleTier> {
        self.nodes.iter().find_map(|node| match node {
            Node::Title { tier, .. } => Some(*tier),
            _ => None,
        })
    }

    pub fn label(&self) -> Option<&TextBlock> {
        self.nodes.iter().find_map(|node| match node {
            Node::Label(text) => Some(text),
            _ => None,
        })
    }

    pub fn description(&self) -> Option<&TextBlock> {
        self.nodes.iter().find_map(|node| match node {
            Node::Description(text) => Some(text),
            _ => None,
        })
    }

    pub fn watermark(&self) -> Option<&TextBlock> {
        self.nodes.iter().find_map(|node| match node {
            Node::Watermark(text) => Some(text),
            _ => None,
        })
    }
}

const LABEL: TextStyle = TextStyle {
    letter_spacing: LABEL_SIZE as f32 * 0.1,
    ..TextStyle::new(LABEL_SIZE, Weight::Regular, 1.0, Fill::Solid(MUTED))
};
const DESCRIPTION: TextStyle =
    TextStyle::new(DESCRIPTION_SIZE, Weight::Regular, 1.4, Fill::Solid(MUTED));
const WATERMARK_TEXT: TextStyle =
    TextStyle::new(WATERMARK_SIZE, Weight::Regular, 1.0, Fill::Solid(WATERMARK));

/// Lay out the card for `request`.
///
/// The header row (glyph plus optional stage label), title and optional
/// description form one column, vertically centred inside the padding box.
/// The watermark is anchored to the bottom-right corner independently.
pub fn compose(request: &ImageRequest, watermark: &str, fonts: &Fonts) -> Card {
    let left = PADDING_X;

    let tier = TitleTier::for_title(&request.title);
    let title_style = TextStyle::new(
        tier.size(),
        Weight::Bold,
        1.2,
        Fill::Gradient {
            from: TITLE_FROM,
            to: TITLE_TO,
        },
    );
    let mut title = TextBlock::new(
        fonts,
        title_style,
        fonts.wrap(Weight::Bold, &request.title, tier.size(), 0.0, CONTENT_WIDTH),
        left,
        0,
    );

    let mut description = request
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| {
            let lines = fonts.wrap(
                DESCRIPTION.weight,
                d,
                DESCRIPTION.size,
                0.0,
                DESCRIPTION_MAX_WIDTH,
            );
            TextBlock::new(fonts, DESCRIPTION, lines, left, 0)
        });

    let column_height = GLYPH_SIZE as i32
        + BLOCK_GAP
        + title.height()
        + BLOCK_GAP
        + description.as_ref().map_or(0, TextBlock::height);
    let inner_height = HEIGHT as i32 - 2 * PADDING_Y;
    let top = PADDING_Y + (inner_height - column_height) / 2;

    let mut nodes = vec![Node::Glyph {
        glyph: request.glyph(),
        x: left,
        y: top,
        size: GLYPH_SIZE,
    }];

    if !request.stage.is_empty() {
        nodes.push(Node::Label(TextBlock::new(
            fonts,
            LABEL,
            vec![request.stage.to_uppercase()],
            left + GLYPH_SIZE as i32 + HEADER_GAP,
            top + (GLYPH_SIZE - LABEL_SIZE) as i32 / 2,
        )));
    }

    title.y = top + GLYPH_SIZE as i32 + BLOCK_GAP;
    let title_bottom = title.y + title.height();
    nodes.push(Node::Title { tier, text: title });

    if let Some(description) = description.as_mut() {
        description.y = title_bottom + BLOCK_GAP;
    }
    nodes.extend(description.map(Node::Description));

    let mut mark = TextBlock::new(
        fonts,
        WATERMARK_TEXT,
        vec![watermark.to_string()],
        0,
        HEIGHT as i32 - PADDING_Y - WATERMARK_SIZE as i32,
    );
    mark.x = WIDTH as i32 - PADDING_X - mark.width.round() as i32;
    nodes.push(Node::Watermark(mark));

    Card {
        width: WIDTH,
        height: HEIGHT,
        background: BACKGROUND,
        nodes,
    }
}
