//! Decoding clips as the engine itself writes them, with fields this crate
//! never produces.

use keymix_clip::{
    decode_clip, decode_shape_mix_file, encode_blend_shape_clip, AttributeBinding, ClassId,
    ShapeMix,
};

const ENGINE_CLIP: &str = "\
%YAML 1.1
%TAG !u! tag:unity3d.com,2011:
--- !u!74 &7400000
AnimationClip:
  m_ObjectHideFlags: 0
  m_CorrespondingSourceObject: {fileID: 0}
  m_PrefabInstance: {fileID: 0}
  m_PrefabAsset: {fileID: 0}
  m_Name: Face Happy
  serializedVersion: 6
  m_Legacy: 0
  m_Compressed: 0
  m_UseHighQualityCurve: 1
  m_RotationCurves: []
  m_CompressedRotationCurves: []
  m_EulerCurves: []
  m_PositionCurves: []
  m_ScaleCurves: []
  m_FloatCurves:
  - curve:
      serializedVersion: 2
      m_Curve:
      - serializedVersion: 3
        time: 0
        value: 100
        inSlope: 0
        outSlope: 0
        tangentMode: 136
        weightedMode: 0
        inWeight: 0.33333334
        outWeight: 0.33333334
      - serializedVersion: 3
        time: 0.016666668
        value: 0
        inSlope: 0
        outSlope: 0
        tangentMode: 136
        weightedMode: 0
        inWeight: 0.33333334
        outWeight: 0.33333334
      m_PreInfinity: 2
      m_PostInfinity: 2
      m_RotationOrder: 4
    attribute: blendShape.vrc.v_aa
    path: Body
    classID: 137
    script: {fileID: 0}
  - curve:
      serializedVersion: 2
      m_Curve:
      - serializedVersion: 3
        time: 0
        value: 62.5
        inSlope: Infinity
        outSlope: Infinity
        tangentMode: 103
        weightedMode: 0
        inWeight: 0.33333334
        outWeight: 0.33333334
      m_PreInfinity: 2
      m_PostInfinity: 2
      m_RotationOrder: 4
    attribute: blendShape.Smile Wide
    path: Body
    classID: 137
    script: {fileID: 0}
  - curve:
      serializedVersion: 2
      m_Curve:
      - serializedVersion: 3
        time: 0
        value: 1
        inSlope: 0
        outSlope: 0
        tangentMode: 136
        weightedMode: 0
        inWeight: 0.33333334
        outWeight: 0.33333334
      m_PreInfinity: 2
      m_PostInfinity: 2
      m_RotationOrder: 4
    attribute: m_IsActive
    path: 
    classID: 1
    script: {fileID: 0}
  - curve:
      serializedVersion: 2
      m_Curve:
      - serializedVersion: 3
        time: 0
        value: 35
        inSlope: 0
        outSlope: 0
        tangentMode: 136
        weightedMode: 0
        inWeight: 0.33333334
        outWeight: 0.33333334
      m_PreInfinity: 2
      m_PostInfinity: 2
      m_RotationOrder: 4
    attribute: blendShape.Blush
    path: Armature/Hips/Spine/Head/Face
    classID: 137
    script: {fileID: 0}
  m_PPtrCurves: []
  m_SampleRate: 60
  m_WrapMode: 0
  m_Bounds:
    m_Center: {x: 0, y: 0, z: 0}
    m_Extent: {x: 0, y: 0, z: 0}
  m_ClipBindingConstant:
    genericBindings:
    - serializedVersion: 2
      path: 2020733466
      attribute: 1592063245
      script: {fileID: 0}
      typeID: 137
      customType: 20
      isPPtrCurve: 0
    pptrCurveMapping: []
  m_AnimationClipSettings:
    serializedVersion: 2
    m_AdditiveReferencePoseClip: {fileID: 0}
    m_AdditiveReferencePoseTime: 0
    m_StartTime: 0
    m_StopTime: 0.016666668
    m_LoopTime: 1
  m_EditorCurves: []
  m_EulerEditorCurves: []
  m_HasGenericRootTransform: 0
  m_HasMotionFloatCurves: 0
  m_Events: []
";

#[test]
fn shape_mix_for_body() {
    let mix = decode_shape_mix_file(ENGINE_CLIP, "Body").unwrap();
    // `blendShape.vrc.v_aa` splits into three parts and does not bind.
    assert_eq!(mix.names().collect::<Vec<_>>(), vec!["Smile Wide"]);
    assert_eq!(mix.get("Smile Wide"), Some(0.625));
}

#[test]
fn shape_mix_for_nested_path() {
    let mix = decode_shape_mix_file(ENGINE_CLIP, "Armature/Hips/Spine/Head/Face").unwrap();
    assert_eq!(mix.get("Blush"), Some(0.35));
    assert_eq!(mix.len(), 1);
}

#[test]
fn unknown_path_yields_empty_mix() {
    let mix = decode_shape_mix_file(ENGINE_CLIP, "Hat").unwrap();
    assert!(mix.is_empty());
}

#[test]
fn full_clip_bindings() {
    let clip = decode_clip(keymix_clip::strip_preamble(ENGINE_CLIP)).unwrap();
    assert_eq!(clip.name, "Face Happy");
    assert_eq!(clip.curves.len(), 4);

    assert_eq!(
        clip.curves[0].binding,
        AttributeBinding::Unrecognized("blendShape.vrc.v_aa".into())
    );
    assert_eq!(clip.curves[0].keyframes.len(), 2);
    assert_eq!(clip.curves[0].keyframes[1].time, 0.016666668);

    let root_toggle = &clip.curves[2];
    assert_eq!(root_toggle.path, "");
    assert_eq!(root_toggle.binding, AttributeBinding::Toggle);
    assert_eq!(root_toggle.class_id, ClassId::GameObject);
}

#[test]
fn re_encoded_mix_matches_engine_weights() {
    let mix = decode_shape_mix_file(ENGINE_CLIP, "Body").unwrap();
    let text = encode_blend_shape_clip("Face Happy", "Body", &mix);
    let again = decode_shape_mix_file(&text, "Body").unwrap();
    // 62.5 rounds half away from zero on the way back out.
    let expected: ShapeMix = vec![("Smile Wide", 0.63)].into_iter().collect();
    assert_eq!(again, expected);
}
