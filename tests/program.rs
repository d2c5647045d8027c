use indoc::indoc;
use pretty_assertions::assert_eq;
use serde_json::json;

use vegl_scriptgen::{assemble, classify, emit_class, Assembler, FieldModel, GeneratorOptions, Layout};

const EMPTY_PROGRAM: &str = indoc! {"
    # Autogenerated Getter/Setter class
    class VEGLBBox:
        def __init__(self, srs, maxNorthing, minNorthing, maxEasting, minEasting):
            self._srs = srs
            self._maxNorthing = maxNorthing
            self._minNorthing = minNorthing
            self._maxEasting = maxEasting
            self._minEasting = minEasting

        def getSrs(self):
            return self._srs

        def getMaxNorthing(self):
            return self._maxNorthing

        def getMinNorthing(self):
            return self._minNorthing

        def getMaxEasting(self):
            return self._maxEasting

        def getMinEasting(self):
            return self._minEasting

        # Returns true if the specified northing/easting (assumed to be in the same SRS)
        # lies within the spatial area represented by this bounding box.
        def isPointInsideArea(self, northing, easting):
            return ((easting >= self._minEasting) and (easting <= self._maxEasting) and (northing >= self._minNorthing) and (northing <= self._maxNorthing))

    # Autogenerated Getter/Setter class
    class VEGLParameters:
        def __init__(self):
            pass

        # Gets an instance of VEGLBBox representing the padded bounds
        def getPaddedBounds(self):
            return VEGLBBox(srs=self._mgaZone, maxNorthing=self._paddingMaxNorthing, maxEasting=self._paddingMaxEasting, minNorthing=self._paddingMinNorthing, minEasting=self._paddingMinEasting)

        # Gets an instance of VEGLBBox representing the selected bounds
        def getSelectedBounds(self):
            return VEGLBBox(srs='EPSG:4326', maxNorthing=self._selectionMaxNorthing, maxEasting=self._selectionMaxEasting, minNorthing=self._selectionMinNorthing, minEasting=self._selectionMinEasting)

    # Global parameter instance for reference
    VEGLParams = VEGLParameters()

"};

fn job_document() -> serde_json::Value {
    json!({
        "uniqueName": "shell0",
        "mgaZone": "EPSG:28355",
        "paddingMaxNorthing": 100,
        "paddingMinNorthing": 0,
        "paddingMaxEasting": 50,
        "paddingMinEasting": 10,
        "selectionMaxNorthing": 90,
        "selectionMinNorthing": 5,
        "selectionMaxEasting": 45,
        "selectionMinEasting": 12,
        "selectedRegion": {"north": 1.5, "south": -2.0},
        "tags": ["gravity", "magnetics"]
    })
}

#[test]
fn empty_model_program() {
    let empty = FieldModel::new();
    assert_eq!(assemble(&empty, &empty).unwrap(), EMPTY_PROGRAM);
}

#[test]
fn job_document_program() {
    let model = FieldModel::from_json(&job_document()).unwrap().callable("onClick");
    assert_eq!(classify(&model).len(), 10);

    let src = assemble(&model, &model).unwrap();

    let init = "    def __init__(self, uniqueName, mgaZone, paddingMaxNorthing, paddingMinNorthing, \
                paddingMaxEasting, paddingMinEasting, selectionMaxNorthing, selectionMinNorthing, \
                selectionMaxEasting, selectionMinEasting):\n";
    assert!(src.contains(init));

    let params_class = src.split("class VEGLParameters:").nth(1).unwrap();
    let accessors: Vec<&str> = params_class
        .lines()
        .filter_map(|l| l.trim().strip_prefix("def get"))
        .filter_map(|l| l.strip_suffix("(self):"))
        .collect();
    assert_eq!(
        accessors,
        [
            "UniqueName", "MgaZone", "PaddingMaxNorthing", "PaddingMinNorthing", "PaddingMaxEasting",
            "PaddingMinEasting", "SelectionMaxNorthing", "SelectionMinNorthing", "SelectionMaxEasting",
            "SelectionMinEasting", "PaddedBounds", "SelectedBounds",
        ]
    );

    assert!(src.ends_with(
        "VEGLParams = VEGLParameters(uniqueName='shell0', mgaZone='EPSG:28355', paddingMaxNorthing=100, \
         paddingMinNorthing=0, paddingMaxEasting=50, paddingMinEasting=10, selectionMaxNorthing=90, \
         selectionMinNorthing=5, selectionMaxEasting=45, selectionMinEasting=12)\n\n"
    ));
    assert!(!src.contains("selectedRegion"));
    assert!(!src.contains("onClick"));
}

#[test]
fn mixed_literal_kinds_in_instantiation() {
    let doc = json!({"name": "it's", "ratio": 0.25, "enabled": true, "missing": null, "count": -3});
    let model = FieldModel::from_json(&doc).unwrap();
    let src = assemble(&model, &model).unwrap();
    assert!(src.contains(
        "VEGLParams = VEGLParameters(name='it\\'s', ratio=0.25, enabled=True, missing=None, count=-3)\n"
    ));
}

#[test]
fn windows_layout_from_options() {
    let opts = GeneratorOptions {
        layout: Layout { indent: "\t".into(), newline: "\r\n".into() },
        ..Default::default()
    };
    let empty = FieldModel::new();
    let src = Assembler::new(opts).assemble(&empty, &empty).unwrap();
    assert_eq!(src, EMPTY_PROGRAM.replace("    ", "\t").replace('\n', "\r\n"));
}

#[test]
fn standalone_class_emission_matches_program_layout() {
    let class = emit_class("VEGLBBox", &["srs", "maxNorthing", "minNorthing", "maxEasting", "minEasting"]);
    let program = assemble(&FieldModel::new(), &FieldModel::new()).unwrap();
    let without_banner = program.strip_prefix("# Autogenerated Getter/Setter class\n").unwrap();
    assert!(without_banner.starts_with(&class));
}
