//! Program assembler: bounding-box helper, generated parameter class and the
//! module-level parameter instance, in that order.
//!
//! The two derived-bounds accessors read `mgaZone`, `padding*` and
//! `selection*` attributes. Their presence is not checked here; a model
//! without them still generates, and the script fails when the accessor runs.
use std::collections::HashMap;

use tracing::info;

use crate::classify::classify;
use crate::codegen::{accessor_name, popo_class, Codegen};
use crate::config::GeneratorOptions;
use crate::error::{Error, Result};
use crate::geometry::{PADDED_CORNERS, SELECTED_CORNERS, ZONE_FIELD};
use crate::ident::{check_field_name, check_identifier};
use crate::ir::{ClassDef, CompareOp, Expr, Item, MethodDef, Program, Statement};
use crate::model::{FieldModel, FieldValue, Primitive};

const BBOX_FIELDS: [&str; 5] = ["srs", "maxNorthing", "minNorthing", "maxEasting", "minEasting"];
const PADDED_BOUNDS: &str = "getPaddedBounds";
const SELECTED_BOUNDS: &str = "getSelectedBounds";
const CLASS_BANNER: &str = "Autogenerated Getter/Setter class";

#[derive(Debug, Clone, Default)]
pub struct Assembler {
    options: GeneratorOptions,
}

/// Generate with default options. `selected_values` supplies the literals of
/// the trailing instantiation; it is usually the same model.
pub fn assemble(field_model: &FieldModel, selected_values: &FieldModel) -> Result<String> {
    Assembler::default().assemble(field_model, selected_values)
}

impl Assembler {
    pub fn new(options: GeneratorOptions) -> Self { Self { options } }

    pub fn options(&self) -> &GeneratorOptions { &self.options }

    pub fn assemble(&self, field_model: &FieldModel, selected_values: &FieldModel) -> Result<String> {
        let program = self.build_program(field_model, selected_values)?;
        let mut cg = Codegen::with_layout(self.options.layout.clone());
        cg.emit(&program);
        let src = cg.into_string();
        info!(
            params_class = %self.options.params_class,
            fields = field_model.len(),
            bytes = src.len(),
            "generated parameter script"
        );
        Ok(src)
    }

    pub fn build_program(&self, field_model: &FieldModel, selected_values: &FieldModel) -> Result<Program> {
        let included = classify(field_model);
        if self.options.validate_identifiers {
            self.check_names(&included)?;
        }

        let mut params = popo_class(&self.options.params_class, &included).with_comment(CLASS_BANNER);
        params.methods.push(self.padded_bounds_method());
        params.methods.push(self.selected_bounds_method());

        Ok(Program {
            items: vec![
                Item::Class(self.bbox_class()),
                Item::Class(params),
                Item::Statement(self.instantiation(&included, selected_values)?),
            ],
        })
    }

    fn check_names(&self, included: &[&str]) -> Result<()> {
        check_identifier("class", &self.options.bbox_class)?;
        check_identifier("class", &self.options.params_class)?;
        check_identifier("global", &self.options.params_global)?;

        // accessor name → what defines it; one definition per name
        let mut accessors: HashMap<String, String> = [PADDED_BOUNDS, SELECTED_BOUNDS]
            .into_iter()
            .map(|m| (m.to_string(), format!("fixed method `{m}`")))
            .collect();
        for &field in included {
            check_field_name(field)?;
            let accessor = accessor_name(field);
            if let Some(owner) = accessors.get(&accessor) {
                return Err(Error::AccessorCollision {
                    field: field.to_string(),
                    accessor,
                    clashes_with: owner.clone(),
                });
            }
            accessors.insert(accessor, format!("field `{field}`"));
        }
        Ok(())
    }

    pub fn bbox_class(&self) -> ClassDef {
        let mut class = popo_class(&self.options.bbox_class, &BBOX_FIELDS).with_comment(CLASS_BANNER);
        class.methods.push(
            MethodDef {
                comments: Vec::new(),
                name: "isPointInsideArea".to_string(),
                params: vec!["northing".to_string(), "easting".to_string()],
                body: vec![Statement::ret(inside_predicate())],
            }
            .with_comment("Returns true if the specified northing/easting (assumed to be in the same SRS)")
            .with_comment("lies within the spatial area represented by this bounding box."),
        );
        class
    }

    pub fn padded_bounds_method(&self) -> MethodDef {
        self.bounds_method(PADDED_BOUNDS, "padded", Expr::attr(ZONE_FIELD), &PADDED_CORNERS)
    }

    pub fn selected_bounds_method(&self) -> MethodDef {
        let srs = Expr::Literal(Primitive::String(self.options.selection_srs.clone()));
        self.bounds_method(SELECTED_BOUNDS, "selected", srs, &SELECTED_CORNERS)
    }

    fn bounds_method(&self, name: &str, what: &str, srs: Expr, corners: &[(&str, &str); 4]) -> MethodDef {
        let kwargs = std::iter::once(("srs", srs))
            .chain(corners.iter().map(|&(kwarg, field)| (kwarg, Expr::attr(field))));
        MethodDef {
            comments: vec![format!("Gets an instance of {} representing the {what} bounds", self.options.bbox_class)],
            name: name.to_string(),
            params: Vec::new(),
            body: vec![Statement::ret(Expr::call(self.options.bbox_class.as_str(), kwargs))],
        }
    }

    /// `VEGLParams = VEGLParameters(field=<literal>, ...)` from the live values.
    fn instantiation(&self, included: &[&str], selected_values: &FieldModel) -> Result<Statement> {
        let mut kwargs = Vec::with_capacity(included.len());
        for &field in included {
            let literal = match selected_values.get(field) {
                None => Primitive::Null,
                Some(FieldValue::Primitive(p)) => p.clone(),
                Some(other) => {
                    return Err(Error::NonPrimitiveValue {
                        field: field.to_string(),
                        found: other.kind_name(),
                    })
                }
            };
            kwargs.push((field, Expr::Literal(literal)));
        }
        Ok(Statement::assign(
            Expr::name(self.options.params_global.as_str()),
            Expr::call(self.options.params_class.as_str(), kwargs),
        )
        .with_comment("Global parameter instance for reference"))
    }
}

fn inside_predicate() -> Expr {
    let within = |coord: &str, min: &str, max: &str| {
        [
            Expr::compare(Expr::name(coord), CompareOp::Ge, Expr::attr(min)),
            Expr::compare(Expr::name(coord), CompareOp::Le, Expr::attr(max)),
        ]
    };
    let mut terms = Vec::with_capacity(4);
    terms.extend(within("easting", "minEasting", "maxEasting"));
    terms.extend(within("northing", "minNorthing", "maxNorthing"));
    Expr::And(terms)
}
