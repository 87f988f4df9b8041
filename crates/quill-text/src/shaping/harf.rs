use harfrust::{
    Direction as HbDirection,
    FontRef as HbFontRef,
    Script as HbScript,
    ShaperData,
    ShaperInstance,
    Tag as HbTag,
    UnicodeBuffer as HbUnicodeBuffer,
};

use crate::shaping::{GlyphShaper, ShapeRequest, ShapedGlyph, Vec2};
use crate::unicode::sanitize_for_shaping;

/// Production shaper built on harfrust (pure-Rust HarfBuzz port).
///
/// Control characters are replaced with shapeable stand-ins before the
/// buffer is built, so line terminators still produce glyphs. Glyphs come
/// back in logical order regardless of direction; harfrust emits RTL runs
/// in visual order and we iterate them reversed.
pub struct HarfShaper;

impl GlyphShaper for HarfShaper {
    fn shape_run(&self, request: &ShapeRequest<'_>) -> Vec<ShapedGlyph> {
        let Some(face) = request.font.face() else {
            // Font resolution should never hand the shaper a face-less font.
            debug_assert!(false, "shaping a font with no loaded face");
            log::error!("shaping a font with no loaded face; emitting no glyphs");
            return Vec::new();
        };

        let font_data = face.as_bytes();
        let font_ref = match HbFontRef::from_index(&font_data, 0) {
            Ok(font_ref) => font_ref,
            Err(err) => {
                debug_assert!(false, "font data rejected by harfrust: {err}");
                log::error!("font data rejected by harfrust: {err}");
                return Vec::new();
            }
        };

        let data = ShaperData::new(&font_ref);
        let instance =
            ShaperInstance::from_variations(&font_ref, core::iter::empty::<harfrust::Variation>());
        let shaper = data
            .shaper(&font_ref)
            .instance(Some(&instance))
            .point_size(None)
            .build();

        // Push the sanitized run text, remembering which byte offset each
        // codepoint lands on; harfrust reports clusters as byte offsets into
        // the pushed string.
        let sanitized = sanitize_for_shaping(request.line);
        let mut pushed = String::new();
        let mut byte_to_cp = Vec::with_capacity(request.range.len());
        for (i, &c) in sanitized[request.range.clone()].iter().enumerate() {
            byte_to_cp.push((pushed.len(), request.range.start + i));
            pushed.push(c);
        }

        let mut buffer = HbUnicodeBuffer::new();
        buffer.push_str(&pushed);
        buffer.set_direction(if request.is_rtl() {
            HbDirection::RightToLeft
        } else {
            HbDirection::LeftToRight
        });

        let short_name = request.script.short_name();
        if short_name.len() == 4 {
            let bytes = short_name.as_bytes();
            let tag = HbTag::new(&[bytes[0], bytes[1], bytes[2], bytes[3]]);
            if let Some(script) = HbScript::from_iso15924_tag(tag) {
                buffer.set_script(script);
            }
        }
        if let Ok(language) = request.language.parse::<harfrust::Language>() {
            buffer.set_language(language);
        }
        buffer.guess_segment_properties();

        let glyph_buffer = shaper.shape(buffer, &[]);
        let infos = glyph_buffer.glyph_infos();
        let positions = glyph_buffer.glyph_positions();

        // harfrust works in design units; scale to pixels with units-per-em.
        let upem = face.units_per_em();
        let scale = if upem != 0 {
            request.font.size() / upem as f32
        } else {
            1.0
        };

        let cp_of_cluster = |cluster: u32| -> usize {
            let byte = cluster as usize;
            let i = byte_to_cp.partition_point(|&(b, _)| b <= byte);
            byte_to_cp
                .get(i.saturating_sub(1))
                .map(|&(_, cp)| cp)
                .unwrap_or(request.range.start)
        };

        let mut glyphs = Vec::with_capacity(infos.len());

        for i in 0..infos.len() {
            let j = if request.is_rtl() { infos.len() - 1 - i } else { i };
            let info = &infos[j];
            let pos = &positions[j];

            let cluster = cp_of_cluster(info.cluster);
            let source_char = request.line.get(cluster).copied().unwrap_or(' ');

            glyphs.push(ShapedGlyph {
                glyph_id: info.glyph_id,
                cluster,
                unsafe_to_break: false,
                whitespace: source_char.is_whitespace(),
                advance: Vec2::new(
                    pos.x_advance as f32 * scale,
                    -(pos.y_advance as f32) * scale,
                ),
                offset: Vec2::new(pos.x_offset as f32 * scale, -(pos.y_offset as f32) * scale),
            });
        }

        // Glyphs sharing a cluster must not be separated by wrapping.
        for i in 0..glyphs.len() {
            let shares_prev = i > 0 && glyphs[i - 1].cluster == glyphs[i].cluster;
            let shares_next = i + 1 < glyphs.len() && glyphs[i + 1].cluster == glyphs[i].cluster;
            glyphs[i].unsafe_to_break = shares_prev || shares_next;
        }

        log::trace!(
            "shaped {} codepoints into {} glyphs (level {})",
            request.range.len(),
            glyphs.len(),
            request.level
        );

        glyphs
    }
}
