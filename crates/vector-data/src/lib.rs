// vector-data: path-data grammar and serde structs for vector drawable resources
pub mod color;
pub mod model;
pub mod path_data;

pub use path_data::{
    interpolate, morph_compatible, parse, serialize, CommandKind, PathCommand, PathDataError,
};

#[cfg(test)]
mod tests {
    use super::model::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_minimal() {
        let data = json!({
            "width": 24,
            "height": 24,
            "viewportWidth": 24,
            "viewportHeight": 24,
            "children": []
        });
        let doc: VectorDocument = serde_json::from_value(data).unwrap();
        assert_eq!(doc.width, 24.0);
        assert_eq!(doc.alpha, 1.0);
        assert_eq!(doc.tint_mode, TintMode::SrcIn);
        assert!(!doc.auto_mirrored);
    }

    #[test]
    fn test_deserialize_nested_elements() {
        let data = json!({
            "name": "icon",
            "width": 24, "height": 24, "viewportWidth": 48, "viewportHeight": 48,
            "children": [
                {
                    "type": "group",
                    "name": "gear",
                    "pivotX": 24, "pivotY": 24, "rotation": 45,
                    "children": [
                        { "type": "clip-path", "pathData": "M0 0 H48 V24 H0 Z" },
                        {
                            "type": "path",
                            "name": "tooth",
                            "pathData": "M4 4 L44 44",
                            "strokeColor": "#FF0000",
                            "strokeWidth": 2,
                            "strokeLineCap": "round",
                            "fillType": "evenOdd"
                        }
                    ]
                }
            ]
        });
        let doc: VectorDocument = serde_json::from_value(data).unwrap();
        let Element::Group(group) = &doc.children[0] else {
            panic!("Expected group, got {:?}", doc.children[0]);
        };
        assert_eq!(group.name.as_deref(), Some("gear"));
        assert_eq!(group.scale_x, 1.0);
        assert!(matches!(group.children[0], Element::ClipPath(_)));
        if let Element::Path(path) = &group.children[1] {
            assert_eq!(path.stroke_line_cap, LineCap::Round);
            assert_eq!(path.stroke_line_join, LineJoin::Miter);
            assert_eq!(path.fill_type, FillType::EvenOdd);
            assert_eq!(path.trim_path_end, 1.0);
            assert_eq!(path.stroke_miter_limit, 4.0);
        } else {
            panic!("Expected path, got {:?}", group.children[1]);
        }
    }

    #[test]
    fn test_deserialize_animator_values() {
        let data = json!({
            "propertyName": "pathData",
            "valueFrom": "M0 0 L1 1",
            "valueTo": "M0 0 L2 2",
            "duration": 500
        });
        let anim: AnimatorElement = serde_json::from_value(data).unwrap();
        assert_eq!(anim.value_from, AnimatorValue::Text("M0 0 L1 1".into()));
        assert_eq!(anim.interpolator, Interpolator::AccelerateDecelerate);

        let rotation: AnimatorElement = serde_json::from_value(json!({
            "propertyName": "rotation", "valueFrom": 0, "valueTo": 360,
            "repeatCount": -1, "repeatMode": "reverse", "interpolator": "linear"
        }))
        .unwrap();
        assert_eq!(rotation.value_to, AnimatorValue::Number(360.0));
        assert_eq!(rotation.duration, 300);
        assert_eq!(rotation.repeat_mode, RepeatMode::Reverse);
    }
}
