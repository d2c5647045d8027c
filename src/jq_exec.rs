//! jq pre-processing of job documents (select the job object out of a larger export).
use anyhow::{anyhow, Context, Result};
use jaq_core::{load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

/// Run `filter_src` over `input`; every output of the filter is one job document.
pub fn select_documents(filter_src: &str, input: &Value) -> Result<Vec<Value>> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader.load(&arena, program).map_err(|errs| {
        let reasons: Vec<String> = errs.into_iter().map(|(_, err)| format!("{err:?}")).collect();
        anyhow!("cannot parse jq filter `{filter_src}`: {}", reasons.join("; "))
    })?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(|errs| {
            let names: Vec<String> = errs
                .into_iter()
                .flat_map(|(_, undefined)| undefined)
                .map(|(name, kind)| format!("`{name}` ({kind:?})"))
                .collect();
            anyhow!("jq filter `{filter_src}` uses undefined {}", names.join(", "))
        })?;

    let inputs = RcIter::new(core::iter::empty());
    let outputs = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

    let mut docs = Vec::new();
    for item in outputs {
        let val = item.map_err(|e| anyhow!("jq evaluation failed: {e:?}"))?;
        // Val renders as JSON text; round-trip it back into serde_json
        let text = val.to_string();
        let doc = serde_json::from_str::<Value>(&text)
            .with_context(|| format!("jq produced non-JSON output `{text}`"))?;
        docs.push(doc);
    }
    Ok(docs)
}
