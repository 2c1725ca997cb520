use pretty_assertions::assert_eq;

use crate::{
    AttrName, AttrType, BufferHandle, CountCheck, DataUsage, Geometry, GeometryError,
    GraphicsContext, Layout, ShaderAttribute, ShaderDescriptor,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Create(BufferHandle),
    Delete(BufferHandle),
    Bind(BufferHandle),
    Data(Vec<f32>, DataUsage),
    Enable(u32),
    Pointer {
        location: u32,
        size: u32,
        attr_type: AttrType,
        normalized: bool,
        stride: u32,
        offset: usize,
    },
}

#[derive(Default)]
struct RecordingContext {
    next_buffer: u32,
    out_of_buffers: bool,
    calls: Vec<Call>,
}

impl RecordingContext {
    fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
}

impl GraphicsContext for RecordingContext {
    fn create_buffer(&mut self) -> Option<BufferHandle> {
        if self.out_of_buffers {
            return None;
        }
        self.next_buffer += 1;
        let buffer = BufferHandle::new(self.next_buffer)?;
        self.calls.push(Call::Create(buffer));
        Some(buffer)
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        self.calls.push(Call::Delete(buffer));
    }

    fn bind_array_buffer(&mut self, buffer: BufferHandle) {
        self.calls.push(Call::Bind(buffer));
    }

    fn buffer_data(&mut self, data: &[f32], usage: DataUsage) {
        self.calls.push(Call::Data(data.to_vec(), usage));
    }

    fn enable_vertex_attrib(&mut self, location: u32) {
        self.calls.push(Call::Enable(location));
    }

    fn vertex_attrib_pointer(
        &mut self,
        location: u32,
        size: u32,
        attr_type: AttrType,
        normalized: bool,
        stride: u32,
        offset: usize,
    ) {
        self.calls.push(Call::Pointer {
            location,
            size,
            attr_type,
            normalized,
            stride,
            offset,
        });
    }
}

fn buffer(raw: u32) -> BufferHandle {
    BufferHandle::new(raw).unwrap()
}

fn float_pointer(location: u32, size: u32) -> Call {
    Call::Pointer {
        location,
        size,
        attr_type: AttrType::Float,
        normalized: false,
        stride: 0,
        offset: 0,
    }
}

fn data_ptr(geometry: &Geometry, name: AttrName) -> *const f32 {
    geometry.attribute(name).unwrap().data().as_ptr()
}

fn sizes(geometry: &Geometry) -> Vec<(String, u32)> {
    let mut sizes: Vec<_> = geometry
        .attributes()
        .map(|(name, attribute)| (name.to_string(), attribute.size()))
        .collect();
    sizes.sort();
    sizes
}

#[test]
fn attr_then_data() {
    let mut geometry = Geometry::new();
    geometry.attr(AttrName::Position, 3).attr("aWeight", 1);

    for k in [1, 4, 7] {
        geometry
            .data(AttrName::Position, vec![0.5; 3 * k])
            .unwrap()
            .data("aWeight", vec![1.0; k])
            .unwrap();

        assert_eq!(geometry.attribute(AttrName::Position).unwrap().data().len(), 3 * k);
        assert_eq!(geometry.attribute("aWeight").unwrap().data().len(), k);
        assert_eq!(geometry.attribute("aWeight").unwrap().vertex_count(), k);
        assert_eq!(geometry.count(), k);
    }
}

#[test]
fn data_for_undeclared_attribute_is_skipped() {
    let mut geometry = Geometry::new();
    geometry.attr(AttrName::Position, 2);

    let result = geometry.data_many([
        (AttrName::Normal, &[0.0, 0.0, 1.0][..]),
        (AttrName::Position, &[1.0, 2.0, 3.0, 4.0][..]),
    ]);

    assert!(result.is_ok());
    assert!(!geometry.contains(AttrName::Normal));
    assert_eq!(geometry.attributes().count(), 1);
    assert_eq!(geometry.count(), 2);
}

#[test]
fn data_with_only_undeclared_names_keeps_count() {
    let mut geometry = Geometry::new();
    geometry.quick_setup("v2").unwrap();
    geometry.data(AttrName::Position, [0.0; 6]).unwrap();
    geometry.mark_clean();

    geometry.data("aMissing", [1.0, 2.0]).unwrap();

    assert_eq!(geometry.count(), 3);
    assert!(geometry.is_dirty());
    assert!(!geometry.contains("aMissing"));
}

#[test]
fn quick_setup_standard_layout() {
    let mut geometry = Geometry::new();
    geometry.quick_setup("v3n3t2c4").unwrap();

    assert_eq!(
        sizes(&geometry),
        vec![
            ("aTextureCoord".to_owned(), 2),
            ("aVertexColor".to_owned(), 4),
            ("aVertexNormal".to_owned(), 3),
            ("aVertexPosition".to_owned(), 3),
        ]
    );
}

#[test]
fn quick_setup_non_numeric_size() {
    let mut geometry = Geometry::new();
    let err = geometry.quick_setup("v3nX").unwrap_err();

    assert_eq!(
        err,
        GeometryError::InvalidLayoutSize {
            code: 'n',
            token: Some('X'),
        }
    );
    assert_eq!(geometry.attributes().count(), 0);
}

#[test]
fn quick_setup_missing_trailing_size() {
    let err = Layout::parse("v3n").unwrap_err();
    assert_eq!(
        err,
        GeometryError::InvalidLayoutSize {
            code: 'n',
            token: None,
        }
    );
    assert_eq!(
        err.to_string(),
        "forgot to add a size after layout code 'n': found end of layout"
    );
}

#[test]
fn quick_setup_skips_unknown_codes() {
    let layout: Layout = "v3x2u2".parse().unwrap();
    assert_eq!(
        layout.entries(),
        &[(AttrName::Position, 3), (AttrName::TexCoord2, 2)]
    );
    assert_eq!(layout.components(), 5);

    // unknown codes still need a numeric size
    assert!(Layout::parse("x?").is_err());
    assert!(Layout::parse("").unwrap().is_empty());
}

#[test]
fn quick_setup_redeclares() {
    let mut geometry = Geometry::new();
    geometry.quick_setup("v3c4").unwrap();
    geometry.quick_setup("c3").unwrap();

    assert_eq!(geometry.attribute(AttrName::Color).unwrap().size(), 3);
    assert_eq!(geometry.attribute(AttrName::Position).unwrap().size(), 3);
}

#[test]
fn same_length_data_reuses_storage() {
    let mut geometry = Geometry::new();
    geometry.attr(AttrName::Position, 3);
    geometry.data(AttrName::Position, [0.0; 9]).unwrap();
    let before = data_ptr(&geometry, AttrName::Position);

    geometry
        .data(AttrName::Position, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0])
        .unwrap();

    assert_eq!(data_ptr(&geometry, AttrName::Position), before);
    assert_eq!(
        geometry.attribute(AttrName::Position).unwrap().data(),
        &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]
    );
}

#[test]
fn different_length_data_reallocates() {
    let mut geometry = Geometry::new();
    geometry.attr(AttrName::Position, 3);
    geometry.data(AttrName::Position, [0.0; 9]).unwrap();
    let before = data_ptr(&geometry, AttrName::Position);

    geometry.data(AttrName::Position, [2.0; 12]).unwrap();

    assert_ne!(data_ptr(&geometry, AttrName::Position), before);
    assert_eq!(geometry.attribute(AttrName::Position).unwrap().data(), &[2.0; 12]);
    assert_eq!(geometry.count(), 4);
}

#[test]
fn count_change_from_other_attribute_reallocates() {
    let mut geometry = Geometry::new();
    geometry.attr("a", 3).attr("b", 2);
    geometry.data("a", [0.0; 6]).unwrap();
    let before = data_ptr(&geometry, "a".into());

    // "b" moves the shared count to 3, so "a" no longer matches it
    geometry.data("b", [0.0; 6]).unwrap();
    assert_eq!(geometry.count(), 3);
    geometry.data("a", [1.0; 6]).unwrap();

    assert_ne!(data_ptr(&geometry, "a".into()), before);
    assert_eq!(geometry.count(), 2);
}

#[test]
fn last_pair_decides_count() {
    let mut geometry = Geometry::new();
    geometry.quick_setup("v3c4").unwrap();
    geometry.mark_clean();

    geometry
        .data_many([
            (AttrName::Position, vec![0.0; 9]),
            (AttrName::Color, vec![1.0; 8]),
        ])
        .unwrap();

    assert!(geometry.is_dirty());
    assert_eq!(geometry.count(), 2);
    assert_eq!(geometry.attribute(AttrName::Position).unwrap().data().len(), 9);
}

#[test]
fn strict_count_check_rejects_disagreement() {
    let mut geometry = Geometry::with_count_check(CountCheck::Strict);
    geometry.quick_setup("v3c4").unwrap();
    assert_eq!(geometry.count_check(), CountCheck::Strict);

    let err = geometry
        .data_many([
            (AttrName::Position, vec![0.0; 9]),
            (AttrName::Color, vec![1.0; 8]),
        ])
        .unwrap_err();

    assert_eq!(
        err,
        GeometryError::CountMismatch {
            name: AttrName::Color,
            expected: 3,
            found: 2,
        }
    );
    assert!(!geometry.is_dirty());
    assert_eq!(geometry.count(), 0);
    assert!(!geometry.attribute(AttrName::Position).unwrap().is_populated());

    geometry
        .data_many([
            (AttrName::Position, vec![0.0; 9]),
            (AttrName::Color, vec![1.0; 12]),
        ])
        .unwrap();
    assert_eq!(geometry.count(), 3);
}

#[test]
fn ragged_data_is_rejected() {
    let mut geometry = Geometry::new();
    geometry.attr(AttrName::Position, 3).attr("aEmpty", 0);

    let err = geometry.data(AttrName::Position, [0.0; 7]).unwrap_err();
    assert_eq!(
        err,
        GeometryError::InvalidDataLength {
            name: AttrName::Position,
            len: 7,
            size: 3,
        }
    );

    let err = geometry.data("aEmpty", [0.0; 2]).unwrap_err();
    assert!(matches!(err, GeometryError::InvalidDataLength { size: 0, .. }));
    assert!(!geometry.is_dirty());
}

#[test]
fn setup_buffers_missing_attribute() {
    let mut geometry = Geometry::new();
    geometry.quick_setup("v3").unwrap();
    geometry.data(AttrName::Position, [0.0; 3]).unwrap();

    let shader = [
        ShaderAttribute::new(AttrName::Position, 0),
        ShaderAttribute::new("aVertexNormal", 1),
    ];
    let mut ctx = RecordingContext::default();
    let err = geometry
        .setup_buffers(&mut ctx, &shader, DataUsage::STATIC_DRAW)
        .unwrap_err();

    assert_eq!(err, GeometryError::ShaderAttributeNotFound(AttrName::Normal));
    assert_eq!(
        err.to_string(),
        "attribute required by shader not found on geometry: aVertexNormal"
    );
    assert!(ctx.calls.is_empty());
    assert_eq!(geometry.attribute(AttrName::Position).unwrap().buffer(), None);
}

#[test]
fn setup_buffers_follows_shader_order() {
    let mut geometry = Geometry::new();
    geometry
        .quick_setup("v2c3")
        .unwrap()
        .data(AttrName::Position, [0.0, 0.0, 1.0, 0.0, 0.0, 1.0])
        .unwrap()
        .data(AttrName::Color, [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
        .unwrap();

    let shader = vec![
        ShaderAttribute::new(AttrName::COLOR, 4),
        ShaderAttribute::new(AttrName::POSITION, 2),
    ];
    assert_eq!(shader.num_attributes(), 2);

    let mut ctx = RecordingContext::default();
    geometry
        .setup_buffers(&mut ctx, &shader, DataUsage::DYNAMIC_DRAW)
        .unwrap();

    assert_eq!(
        ctx.take_calls(),
        vec![
            Call::Create(buffer(1)),
            Call::Bind(buffer(1)),
            Call::Data(
                vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
                DataUsage::DYNAMIC_DRAW
            ),
            Call::Enable(4),
            float_pointer(4, 3),
            Call::Create(buffer(2)),
            Call::Bind(buffer(2)),
            Call::Data(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0], DataUsage::DYNAMIC_DRAW),
            Call::Enable(2),
            float_pointer(2, 2),
        ]
    );
    assert_eq!(geometry.attribute(AttrName::Color).unwrap().buffer(), Some(buffer(1)));
    assert_eq!(geometry.attribute(AttrName::Position).unwrap().buffer(), Some(buffer(2)));
}

#[test]
fn setup_buffers_reuses_buffers_and_rereads_data() {
    let mut geometry = Geometry::new();
    geometry.attr("aOffset", 1);
    geometry.data("aOffset", [1.0, 2.0]).unwrap();

    let shader = [ShaderAttribute::new("aOffset", 0)];
    let mut ctx = RecordingContext::default();
    geometry
        .setup_buffers(&mut ctx, &shader, DataUsage::STATIC_DRAW)
        .unwrap();
    ctx.take_calls();

    // a longer array reallocates CPU storage but keeps the GPU buffer
    geometry.data("aOffset", [3.0, 4.0, 5.0]).unwrap();
    geometry
        .setup_buffers(&mut ctx, &shader, DataUsage::STATIC_DRAW)
        .unwrap();

    assert_eq!(
        ctx.take_calls(),
        vec![
            Call::Bind(buffer(1)),
            Call::Data(vec![3.0, 4.0, 5.0], DataUsage::STATIC_DRAW),
            Call::Enable(0),
            float_pointer(0, 1),
        ]
    );
    assert!(geometry.is_dirty());
}

#[test]
fn setup_buffers_before_data_uploads_nothing() {
    let mut geometry = Geometry::new();
    geometry.quick_setup("v3").unwrap();

    let mut ctx = RecordingContext::default();
    geometry
        .setup_buffers(
            &mut ctx,
            &[ShaderAttribute::new(AttrName::Position, 0)],
            DataUsage::STATIC_DRAW,
        )
        .unwrap();

    assert!(ctx.calls.contains(&Call::Data(vec![], DataUsage::STATIC_DRAW)));
}

#[test]
fn redeclaring_forgets_buffer() {
    let mut geometry = Geometry::new();
    geometry.quick_setup("v2").unwrap();
    geometry.data(AttrName::Position, [0.0; 4]).unwrap();

    let shader = [ShaderAttribute::new(AttrName::Position, 0)];
    let mut ctx = RecordingContext::default();
    geometry
        .setup_buffers(&mut ctx, &shader, DataUsage::STATIC_DRAW)
        .unwrap();

    geometry.attr(AttrName::Position, 2);
    assert_eq!(geometry.attribute(AttrName::Position).unwrap().buffer(), None);
    assert!(geometry.attribute(AttrName::Position).unwrap().data().is_empty());

    ctx.take_calls();
    geometry
        .setup_buffers(&mut ctx, &shader, DataUsage::STATIC_DRAW)
        .unwrap();
    assert_eq!(ctx.calls[0], Call::Create(buffer(2)));
}

#[test]
fn release_buffers_deletes_each_once() {
    let mut geometry = Geometry::new();
    geometry
        .quick_setup("v3n3")
        .unwrap()
        .data_many([
            (AttrName::Position, [0.0; 3]),
            (AttrName::Normal, [0.0, 0.0, 1.0]),
        ])
        .unwrap();

    let shader = [
        ShaderAttribute::new(AttrName::Position, 0),
        ShaderAttribute::new(AttrName::Normal, 1),
    ];
    let mut ctx = RecordingContext::default();
    geometry
        .setup_buffers(&mut ctx, &shader, DataUsage::STATIC_DRAW)
        .unwrap();
    ctx.take_calls();

    geometry.release_buffers(&mut ctx);
    let mut deleted = ctx.take_calls();
    deleted.sort_by_key(|call| match call {
        Call::Delete(buffer) => buffer.get(),
        _ => u32::MAX,
    });
    assert_eq!(deleted, vec![Call::Delete(buffer(1)), Call::Delete(buffer(2))]);

    geometry.release_buffers(&mut ctx);
    assert!(ctx.calls.is_empty());
}

#[test]
fn buffer_creation_failure() {
    let mut geometry = Geometry::new();
    geometry.quick_setup("t2").unwrap();
    geometry.data(AttrName::TexCoord, [0.0, 1.0]).unwrap();

    let mut ctx = RecordingContext {
        out_of_buffers: true,
        ..RecordingContext::default()
    };
    let err = geometry
        .setup_buffers(
            &mut ctx,
            &[ShaderAttribute::new(AttrName::TexCoord, 0)],
            DataUsage::STATIC_DRAW,
        )
        .unwrap_err();

    assert_eq!(err, GeometryError::BufferCreation(AttrName::TexCoord));
}

#[test]
fn well_known_names_are_normalized() {
    assert_eq!(AttrName::from("aVertexPosition"), AttrName::Position);
    assert_eq!(AttrName::from("aTextureCoord2".to_owned()), AttrName::TexCoord2);
    assert_eq!(AttrName::Custom("aVertexNormal".to_owned()), AttrName::Normal);
    assert_eq!(AttrName::from("aTangent"), AttrName::Custom("aTangent".to_owned()));

    assert_eq!(AttrName::Color.to_string(), "aVertexColor");
    assert_eq!(AttrName::from_code('t'), Some(AttrName::TexCoord));
    assert_eq!(AttrName::from_code('q'), None);
    assert_eq!(AttrName::Custom("aVertexColor".to_owned()).code(), Some('c'));
    assert!(AttrName::from("aTangent").is_custom());

    let mut geometry = Geometry::new();
    geometry.attr("aVertexNormal", 3);
    assert!(geometry.contains(AttrName::Normal));
    assert!(geometry.contains("aVertexNormal"));
}
