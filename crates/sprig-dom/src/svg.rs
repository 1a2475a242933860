//! SVG attribute casing.
//!
//! HTML attribute names are case-insensitive and tokenizers lowercase them,
//! but SVG attribute names are case-sensitive: `viewbox` is not `viewBox`.
//! This module restores the canonical spelling on both input paths: the
//! parser (lowercase source names) and constructor keywords (snake_case
//! names such as `view_box`).

use std::collections::HashMap;
use std::sync::LazyLock;

/// Lowercase name to canonical camelCase name.
const SVG_ATTRIBUTE_ADJUSTMENTS: &[(&str, &str)] = &[
    ("attributename", "attributeName"),
    ("attributetype", "attributeType"),
    ("basefrequency", "baseFrequency"),
    ("baseprofile", "baseProfile"),
    ("calcmode", "calcMode"),
    ("clippathunits", "clipPathUnits"),
    ("diffuseconstant", "diffuseConstant"),
    ("edgemode", "edgeMode"),
    ("filterunits", "filterUnits"),
    ("glyphref", "glyphRef"),
    ("gradienttransform", "gradientTransform"),
    ("gradientunits", "gradientUnits"),
    ("kernelmatrix", "kernelMatrix"),
    ("kernelunitlength", "kernelUnitLength"),
    ("keypoints", "keyPoints"),
    ("keysplines", "keySplines"),
    ("keytimes", "keyTimes"),
    ("lengthadjust", "lengthAdjust"),
    ("limitingconeangle", "limitingConeAngle"),
    ("markerheight", "markerHeight"),
    ("markerunits", "markerUnits"),
    ("markerwidth", "markerWidth"),
    ("maskcontentunits", "maskContentUnits"),
    ("maskunits", "maskUnits"),
    ("numoctaves", "numOctaves"),
    ("pathlength", "pathLength"),
    ("patterncontentunits", "patternContentUnits"),
    ("patterntransform", "patternTransform"),
    ("patternunits", "patternUnits"),
    ("pointsatx", "pointsAtX"),
    ("pointsaty", "pointsAtY"),
    ("pointsatz", "pointsAtZ"),
    ("preservealpha", "preserveAlpha"),
    ("preserveaspectratio", "preserveAspectRatio"),
    ("primitiveunits", "primitiveUnits"),
    ("refx", "refX"),
    ("refy", "refY"),
    ("repeatcount", "repeatCount"),
    ("repeatdur", "repeatDur"),
    ("requiredextensions", "requiredExtensions"),
    ("requiredfeatures", "requiredFeatures"),
    ("specularconstant", "specularConstant"),
    ("specularexponent", "specularExponent"),
    ("spreadmethod", "spreadMethod"),
    ("startoffset", "startOffset"),
    ("stddeviation", "stdDeviation"),
    ("stitchtiles", "stitchTiles"),
    ("surfacescale", "surfaceScale"),
    ("systemlanguage", "systemLanguage"),
    ("tablevalues", "tableValues"),
    ("targetx", "targetX"),
    ("targety", "targetY"),
    ("textlength", "textLength"),
    ("viewbox", "viewBox"),
    ("viewtarget", "viewTarget"),
    ("xchannelselector", "xChannelSelector"),
    ("ychannelselector", "yChannelSelector"),
    ("zoomandpan", "zoomAndPan"),
];

/// snake_case spelling (`view_box`, `points_at_x`) to camelCase.
static SNAKE_TO_CAMEL: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    SVG_ATTRIBUTE_ADJUSTMENTS
        .iter()
        .map(|&(_, camel)| (camel_to_snake(camel), camel))
        .collect()
});

/// Insert `_` at every lowercase-to-uppercase boundary, then lowercase.
fn camel_to_snake(camel: &str) -> String {
    let mut snake = String::with_capacity(camel.len() + 4);
    let mut previous_lower = false;
    for c in camel.chars() {
        if c.is_ascii_uppercase() && previous_lower {
            snake.push('_');
        }
        previous_lower = c.is_ascii_lowercase();
        snake.push(c.to_ascii_lowercase());
    }
    snake
}

/// Canonical casing for a lowercased SVG attribute name (`viewbox` gives
/// `viewBox`).
#[must_use]
pub fn adjust_svg_attribute(lowercase: &str) -> Option<&'static str> {
    SVG_ATTRIBUTE_ADJUSTMENTS
        .iter()
        .find(|&&(from, _)| from == lowercase)
        .map(|&(_, to)| to)
}

/// Canonical casing for a snake_case SVG keyword (`view_box` gives
/// `viewBox`).
#[must_use]
pub fn svg_attribute_for_keyword(snake: &str) -> Option<&'static str> {
    SNAKE_TO_CAMEL.get(snake).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_names_follow_word_boundaries() {
        assert_eq!(camel_to_snake("viewBox"), "view_box");
        assert_eq!(camel_to_snake("pointsAtX"), "points_at_x");
        assert_eq!(camel_to_snake("xChannelSelector"), "x_channel_selector");
        assert_eq!(svg_attribute_for_keyword("ref_x"), Some("refX"));
        assert_eq!(svg_attribute_for_keyword("viewbox"), None);
    }
}
