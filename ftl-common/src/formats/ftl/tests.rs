//! Tests for the FTL codec

use super::*;

fn sample_model() -> FtlModel {
    let vertices = vec![
        FtlVertex {
            position: [0.0, -1.0, 0.0],
            normal: [0.0, 0.0, -1.0],
        },
        FtlVertex {
            position: [1.0, -1.0, 0.0],
            normal: [0.0, 0.0, -1.0],
        },
        FtlVertex {
            position: [0.0, 0.0, 0.0],
            normal: [0.0, 0.0, -1.0],
        },
    ];
    let face = FtlFace {
        vertex_indices: [0, 2, 1],
        texture_index: 0,
        u: [0.0, 0.0, 1.0],
        v: [0.0, 1.0, 0.0],
        ou: [0, 0, 255],
        ov: [0, 255, 0],
        normal: [0.0, 0.0, -1.0],
        corner_normals: [[0.0, 0.0, -1.0]; 3],
        ..FtlFace::default()
    };
    FtlModel {
        name: "crate".to_string(),
        origin: 0,
        vertices,
        faces: vec![face],
        textures: vec!["graph\\obj3d\\textures\\wood.bmp".to_string()],
        groups: vec![
            FtlGroup {
                name: "lid".to_string(),
                origin: 2,
                indices: vec![0, 2],
                ..FtlGroup::default()
            },
            FtlGroup {
                name: "base".to_string(),
                origin: 1,
                indices: vec![1],
                ..FtlGroup::default()
            },
        ],
        actions: vec![FtlAction {
            name: "hit_10".to_string(),
            vertex_index: 1,
            action: 0,
            sfx: -1,
        }],
        selections: vec![FtlSelection {
            name: "all".to_string(),
            selected: 0,
            indices: vec![0, 1, 2],
        }],
    }
}

#[test]
fn test_record_sizes() {
    assert_eq!(FtlPrimaryHeader::SIZE, 8);
    assert_eq!(FtlSecondaryHeader::SIZE, 24);
    assert_eq!(FtlDataHeader::SIZE, 284);
    assert_eq!(FtlVertex::SIZE, 56);
    assert_eq!(FtlFace::SIZE, 116);
    assert_eq!(FtlGroup::SIZE, 272);
    assert_eq!(FtlAction::SIZE, 268);
    assert_eq!(FtlSelection::SIZE, 72);
}

#[test]
fn test_written_size_matches_layout() {
    let model = sample_model();
    let bytes = write_ftl(&model).unwrap();

    let expected = DATA_OFFSET
        + FtlDataHeader::SIZE
        + 3 * FtlVertex::SIZE
        + FtlFace::SIZE
        + NAME_SIZE
        + 2 * FtlGroup::SIZE
        + 3 * 4
        + FtlAction::SIZE
        + FtlSelection::SIZE
        + 3 * 4;
    assert_eq!(bytes.len(), expected);
    assert_eq!(&bytes[0..4], b"FTL\0");

    let secondary = FtlSecondaryHeader::from_bytes(&bytes[520..]).unwrap();
    assert_eq!(secondary.offset_3d_data as usize, DATA_OFFSET);
    assert_eq!(secondary.offset_clothes_data, -1);
}

#[test]
fn test_model_survives_write_and_read() {
    let model = sample_model();
    let bytes = write_ftl(&model).unwrap();
    let parsed = read_ftl(&bytes).unwrap();
    assert_eq!(parsed, model);
}

#[test]
fn test_group_indices_follow_all_group_records() {
    let model = sample_model();
    let bytes = write_ftl(&model).unwrap();

    let groups_start = DATA_OFFSET
        + FtlDataHeader::SIZE
        + 3 * FtlVertex::SIZE
        + FtlFace::SIZE
        + NAME_SIZE;
    let indices_start = groups_start + 2 * FtlGroup::SIZE;
    let read = |at: usize| i32::from_le_bytes(bytes[at..at + 4].try_into().unwrap());

    // index_count of each group record
    assert_eq!(read(groups_start + NAME_SIZE + 4), 2);
    assert_eq!(read(groups_start + FtlGroup::SIZE + NAME_SIZE + 4), 1);
    assert_eq!(read(indices_start), 0);
    assert_eq!(read(indices_start + 4), 2);
    assert_eq!(read(indices_start + 8), 1);
}

#[test]
fn test_untextured_face() {
    let face = FtlFace::default();
    assert_eq!(face.texture_index, FTL_NO_TEXTURE);
    assert_eq!(face.texture(), None);

    let textured = FtlFace {
        texture_index: 3,
        ..FtlFace::default()
    };
    assert_eq!(textured.texture(), Some(3));
}

#[test]
fn test_bad_ident_rejected() {
    let mut bytes = write_ftl(&sample_model()).unwrap();
    bytes[0..4].copy_from_slice(b"OBJ\0");
    assert!(matches!(read_ftl(&bytes), Err(FtlError::BadIdent(_))));
}

#[test]
fn test_unsupported_version_rejected() {
    let mut bytes = write_ftl(&sample_model()).unwrap();
    bytes[4..8].copy_from_slice(&1.0f32.to_le_bytes());
    assert!(matches!(
        read_ftl(&bytes),
        Err(FtlError::UnsupportedVersion(v)) if v == 1.0
    ));
}

#[test]
fn test_truncated_faces_reported() {
    let bytes = write_ftl(&sample_model()).unwrap();
    let cut = DATA_OFFSET + FtlDataHeader::SIZE + 3 * FtlVertex::SIZE + 10;
    match read_ftl(&bytes[..cut]) {
        Err(FtlError::Truncated { section, .. }) => assert_eq!(section, "faces"),
        other => panic!("expected truncation, got {:?}", other),
    }
}

#[test]
fn test_missing_3d_data() {
    let mut bytes = write_ftl(&sample_model()).unwrap();
    bytes[520..524].copy_from_slice(&(-1i32).to_le_bytes());
    assert!(matches!(read_ftl(&bytes), Err(FtlError::Missing3dData)));
}

#[test]
fn test_negative_vertex_count_rejected() {
    let mut bytes = write_ftl(&sample_model()).unwrap();
    bytes[DATA_OFFSET..DATA_OFFSET + 4].copy_from_slice(&(-5i32).to_le_bytes());
    assert!(matches!(
        read_ftl(&bytes),
        Err(FtlError::InvalidCount {
            section: "vertex",
            count: -5
        })
    ));
}

#[test]
fn test_long_texture_name_rejected() {
    let mut model = sample_model();
    model.textures.push("x".repeat(NAME_SIZE));
    assert!(matches!(
        write_ftl(&model),
        Err(FtlError::InvalidName { .. })
    ));
}

#[test]
fn test_vertex_slot_filled_from_position() {
    let model = sample_model();
    let bytes = write_ftl(&model).unwrap();
    let start = DATA_OFFSET + FtlDataHeader::SIZE + FtlVertex::SIZE;
    let x = f32::from_le_bytes(bytes[start..start + 4].try_into().unwrap());
    let y = f32::from_le_bytes(bytes[start + 4..start + 8].try_into().unwrap());
    assert_eq!([x, y], [1.0, -1.0]);
}

fn patch_i32(bytes: &mut [u8], offset: usize, value: i32) {
    bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

#[test]
fn test_oversized_counts_rejected_before_allocating() {
    let bytes = write_ftl(&FtlModel::default()).unwrap();
    for (field, section) in [(3, "groups"), (5, "selections"), (0, "vertices")] {
        let mut corrupt = bytes.clone();
        patch_i32(&mut corrupt, DATA_OFFSET + 4 * field, i32::MAX);
        match read_ftl(&corrupt) {
            Err(FtlError::Truncated {
                section: found,
                available,
                ..
            }) => {
                assert_eq!(found, section);
                assert_eq!(available, 0);
            }
            other => panic!("expected truncation, got {:?}", other),
        }
    }
}

#[test]
fn test_oversized_group_index_count_rejected() {
    let model = FtlModel {
        groups: vec![FtlGroup {
            name: "lid".to_string(),
            indices: vec![0],
            ..FtlGroup::default()
        }],
        ..FtlModel::default()
    };
    let mut bytes = write_ftl(&model).unwrap();
    patch_i32(&mut bytes, DATA_OFFSET + FtlDataHeader::SIZE + NAME_SIZE + 4, i32::MAX);
    assert!(matches!(
        read_ftl(&bytes),
        Err(FtlError::Truncated {
            section: "group indices",
            ..
        })
    ));
}
