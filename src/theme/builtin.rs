use crate::colour::{ColourRole, ColourValue};
use crate::font::FontStyle;
use crate::palette::Palette;

use super::{EditorColours, FontStyleTable};

const FUNCTION_NAMES: &[&str] = &[
    "FunctionMethodName",
    "ClassName",
    "Attribute",
    "UnknownAttribute",
];
const UNCLOSED_STRINGS: &[&str] = &["UnclosedString"];
const COMMENTS: &[&str] = &["Comment", "CommentBlock", "HTMLComment"];
const KEYWORDS: &[&str] = &[
    "Keyword",
    "Tag",
    "UnknownTag",
    "XMLTagEnd",
    "XMLStart",
    "XMLEnd",
    "ClassSelector",
    "PseudoClass",
    "UnknownPseudoClass",
    "IDSelector",
];
const STRINGS: &[&str] = &[
    "SingleQuotedString",
    "DoubleQuotedString",
    "HTMLSingleQuotedString",
    "HTMLDoubleQuotedString",
    "CSS1Property",
    "CSS2Property",
    "CSS3Property",
    "UnknownProperty",
];
const TRIPLE_STRINGS: &[&str] = &["TripleSingleQuotedString", "TripleDoubleQuotedString"];
const NUMBERS: &[&str] = &["Number", "HTMLNumber", "Value"];
const DECORATORS: &[&str] = &["Decorator", "CDATA", "AtRule", "MediaRule"];
const PLAIN: &[&str] = &["Default", "Identifier", "OtherInTag"];
const OPERATORS: &[&str] = &["Operator", "Entity"];
const HIGHLIGHTED: &[&str] = &["HighlightedIdentifier", "Variable"];

pub const DAY_COLOURS: Palette = Palette::from_entries([
    (ColourRole::Border, ColourValue::hex(0xb4b4b4)),
    (ColourRole::Hover, ColourValue::hex(0xcccccc)),
    (ColourRole::Close, ColourValue::hex(0xe97867)),
    (ColourRole::Foreground, ColourValue::hex(0x000000)),
    (ColourRole::Background, ColourValue::hex(0xeeeeee)),
    (ColourRole::EditorBackground, ColourValue::hex(0xfefef7)),
    (ColourRole::EditorForeground, ColourValue::hex(0x181818)),
    (ColourRole::Control, ColourValue::hex(0xc4c4c4)),
    (ColourRole::TabCurrent, ColourValue::hex(0xe0e0e0)),
    (ColourRole::Focus, ColourValue::hex(0x0f53e7)),
]);

pub const NIGHT_COLOURS: Palette = Palette::from_entries([
    (ColourRole::Border, ColourValue::hex(0x6b6b6b)),
    (ColourRole::Hover, ColourValue::hex(0x5c5c5c)),
    (ColourRole::Close, ColourValue::hex(0xc93827)),
    (ColourRole::Foreground, ColourValue::hex(0xffffff)),
    (ColourRole::Background, ColourValue::hex(0x222222)),
    (ColourRole::EditorBackground, ColourValue::hex(0x373737)),
    (ColourRole::EditorForeground, ColourValue::hex(0xffffff)),
    (ColourRole::Control, ColourValue::hex(0x474747)),
    (ColourRole::TabCurrent, ColourValue::hex(0x6b6b6b)),
    (ColourRole::Focus, ColourValue::hex(0x929292)),
]);

pub const CONTRAST_COLOURS: Palette = Palette::from_entries([
    (ColourRole::Border, ColourValue::hex(0x555555)),
    (ColourRole::Hover, ColourValue::hex(0x888888)),
    (ColourRole::Close, ColourValue::hex(0xc93827)),
    (ColourRole::Foreground, ColourValue::hex(0xffffff)),
    (ColourRole::Background, ColourValue::hex(0x000000)),
    (ColourRole::EditorBackground, ColourValue::hex(0xffffff)),
    (ColourRole::EditorForeground, ColourValue::hex(0x000000)),
    (ColourRole::Control, ColourValue::hex(0x2e2e2e)),
    (ColourRole::TabCurrent, ColourValue::hex(0x555555)),
    (ColourRole::Focus, ColourValue::hex(0xffff00)),
]);

/// Starting point of the user-editable theme. Differs from day only in the
/// editor background.
pub const CUSTOM_DEFAULTS: Palette = Palette::from_entries([
    (ColourRole::Border, ColourValue::hex(0xb4b4b4)),
    (ColourRole::Hover, ColourValue::hex(0xcccccc)),
    (ColourRole::Close, ColourValue::hex(0xe97867)),
    (ColourRole::Foreground, ColourValue::hex(0x000000)),
    (ColourRole::Background, ColourValue::hex(0xeeeeee)),
    (ColourRole::EditorBackground, ColourValue::hex(0xfefee7)),
    (ColourRole::EditorForeground, ColourValue::hex(0x181818)),
    (ColourRole::Control, ColourValue::hex(0xc4c4c4)),
    (ColourRole::TabCurrent, ColourValue::hex(0xe0e0e0)),
    (ColourRole::Focus, ColourValue::hex(0x0f53e7)),
]);

const UNMATCHED_DAY: ColourValue = ColourValue::hex(0xffdddd);

pub(super) const DAY_EDITOR: EditorColours = EditorColours {
    caret: ColourValue::hex(0x181818),
    margin: ColourValue::hex(0xeeeeee),
    indicator_error: ColourValue::hex(0xff0000),
    indicator_style: ColourValue::hex(0x0000ff),
    debug_style: ColourValue::hex(0xffcc33),
    indicator_word_match: ColourValue::hex(0xd3d3d3),
    brace_background: ColourValue::hex(0xd3d3d3),
    brace_foreground: ColourValue::hex(0x0000ff),
    unmatched_brace_background: UNMATCHED_DAY,
    unmatched_brace_foreground: ColourValue::hex(0x000000),
    breakpoint_marker: ColourValue::hex(0xd80000),
    important: UNMATCHED_DAY,
};

const UNMATCHED_NIGHT: ColourValue = ColourValue::hex(0xc93827);

pub(super) const NIGHT_EDITOR: EditorColours = EditorColours {
    caret: ColourValue::hex(0xc6c6c6),
    margin: ColourValue::hex(0x424446),
    indicator_error: ColourValue::hex(0xc93827),
    indicator_style: ColourValue::hex(0x2f5692),
    debug_style: ColourValue::hex(0x444444),
    indicator_word_match: ColourValue::hex(0xf14721),
    brace_background: ColourValue::hex(0xed1596),
    brace_foreground: ColourValue::hex(0x222222),
    unmatched_brace_background: UNMATCHED_NIGHT,
    unmatched_brace_foreground: ColourValue::hex(0x222222),
    breakpoint_marker: ColourValue::hex(0xc93827),
    important: UNMATCHED_NIGHT,
};

const UNMATCHED_CONTRAST: ColourValue = ColourValue::hex(0x666666);

pub(super) const CONTRAST_EDITOR: EditorColours = EditorColours {
    caret: ColourValue::hex(0xffffff),
    margin: ColourValue::hex(0x333333),
    indicator_error: ColourValue::hex(0xffffff),
    indicator_style: ColourValue::hex(0x00ffff),
    debug_style: ColourValue::hex(0x666666),
    indicator_word_match: ColourValue::hex(0x808080),
    brace_background: ColourValue::hex(0xffffff),
    brace_foreground: ColourValue::hex(0x000000),
    unmatched_brace_background: UNMATCHED_CONTRAST,
    unmatched_brace_foreground: ColourValue::hex(0x000000),
    breakpoint_marker: ColourValue::hex(0xd3d3d3),
    important: UNMATCHED_CONTRAST,
};

/// Syntax styles shared by the day and custom themes.
pub(super) fn day_fonts() -> FontStyleTable {
    FontStyleTable::new()
        .group(FUNCTION_NAMES, FontStyle::fg(0x0000a0))
        .group(UNCLOSED_STRINGS, FontStyle::new().on(0xffdddd))
        .group(COMMENTS, FontStyle::fg(0x808080))
        .group(KEYWORDS, FontStyle::fg(0x005050).bold())
        .group(STRINGS, FontStyle::fg(0x800000))
        .group(TRIPLE_STRINGS, FontStyle::fg(0x006600))
        .group(NUMBERS, FontStyle::fg(0x00008b))
        .group(DECORATORS, FontStyle::fg(0xcc6600))
        .group(PLAIN, FontStyle::new())
        .group(OPERATORS, FontStyle::fg(0x400040))
        .group(HIGHLIGHTED, FontStyle::fg(0x0000a0))
}

pub(super) fn night_fonts() -> FontStyleTable {
    FontStyleTable::new()
        .group(FUNCTION_NAMES, FontStyle::fg(0x81a2be))
        .group(UNCLOSED_STRINGS, FontStyle::new().on(0xc93827))
        .group(COMMENTS, FontStyle::fg(0x969896))
        .group(KEYWORDS, FontStyle::fg(0x73a46a).bold())
        .group(STRINGS, FontStyle::fg(0xf0c674))
        .group(TRIPLE_STRINGS, FontStyle::fg(0xf0c674))
        .group(NUMBERS, FontStyle::fg(0xb5bd68))
        .group(DECORATORS, FontStyle::fg(0xcc6666))
        .group(PLAIN, FontStyle::fg(0xdddddd))
        .group(OPERATORS, FontStyle::fg(0xb294bb))
        .group(HIGHLIGHTED, FontStyle::fg(0xde935f))
}

pub(super) fn contrast_fonts() -> FontStyleTable {
    FontStyleTable::new()
        .group(FUNCTION_NAMES, FontStyle::fg(0xaaaaaa).on(0x000000))
        .group(UNCLOSED_STRINGS, FontStyle::new().on(0x666666))
        .group(COMMENTS, FontStyle::fg(0xaaaaaa).on(0x000000))
        .group(KEYWORDS, FontStyle::fg(0xeeeeee).on(0x000000).bold())
        .group(STRINGS, FontStyle::fg(0xaaaaaa).on(0x000000))
        .group(TRIPLE_STRINGS, FontStyle::fg(0xaaaaaa).on(0x000000))
        .group(NUMBERS, FontStyle::fg(0xaaaaaa).on(0x000000))
        .group(DECORATORS, FontStyle::fg(0xcccccc).on(0x000000))
        .group(PLAIN, FontStyle::fg(0xffffff).on(0x000000))
        .group(OPERATORS, FontStyle::fg(0xcccccc).on(0x000000))
        .group(HIGHLIGHTED, FontStyle::fg(0xffffff).on(0x000000))
}

pub(super) const CONTRAST_DEFAULT_FONT: FontStyle = FontStyle::new().on(0x000000);
