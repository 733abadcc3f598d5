extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, FnArg, ImplItem, ItemImpl, LitStr, Pat, PatType, Type};

/// Turn an `impl` block with an `async fn execute(&self, params: P) -> ToolResult`
/// into a tool the model can call.
///
/// ```ignore
/// #[tool(name = "get_weather", description = "Get the weather for a location")]
/// impl WeatherTool {
///     async fn execute(&self, params: WeatherParams) -> ToolResult { .. }
/// }
/// ```
#[proc_macro_attribute]
pub fn tool(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut attrs = ToolAttrs::default();
    let parser = syn::meta::parser(|meta| attrs.parse(meta));
    parse_macro_input!(args with parser);

    let input = parse_macro_input!(input as ItemImpl);

    match tool_impl(attrs, input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

#[derive(Default)]
struct ToolAttrs {
    name: Option<LitStr>,
    description: Option<LitStr>,
}

impl ToolAttrs {
    fn parse(&mut self, meta: syn::meta::ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("name") {
            self.name = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("description") {
            self.description = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported tool attribute, expected `name` or `description`"))
        }
    }
}

fn params_type(input: &ItemImpl) -> syn::Result<&Type> {
    let execute = input
        .items
        .iter()
        .find_map(|item| match item {
            ImplItem::Fn(method) if method.sig.ident == "execute" => Some(method),
            _ => None,
        })
        .ok_or_else(|| syn::Error::new_spanned(&input.self_ty, "Expected an 'execute' method"))?;

    execute
        .sig
        .inputs
        .iter()
        .find_map(|arg| match arg {
            FnArg::Typed(PatType { pat, ty, .. }) => match pat.as_ref() {
                Pat::Ident(ident) if ident.ident == "params" => Some(ty.as_ref()),
                _ => None,
            },
            _ => None,
        })
        .ok_or_else(|| syn::Error::new_spanned(&execute.sig, "Expected 'execute' method to have a 'params' parameter"))
}

fn tool_impl(attrs: ToolAttrs, input: ItemImpl) -> syn::Result<TokenStream2> {
    let name = attrs
        .name
        .ok_or_else(|| syn::Error::new_spanned(&input.self_ty, "Missing required 'name' attribute"))?;
    let description = attrs
        .description
        .ok_or_else(|| syn::Error::new_spanned(&input.self_ty, "Missing required 'description' attribute"))?;

    // Use CARGO_PKG_NAME to detect if we're inside genai-core or external
    let pkg_name = std::env::var("CARGO_PKG_NAME").unwrap_or_default();
    let crate_name = if pkg_name == "genai-core" || pkg_name == "genai_core" {
        quote! { crate }
    } else {
        quote! { ::genai_core }
    };

    let self_ty = &input.self_ty;
    let param_type = params_type(&input)?;

    let expanded = quote! {
        #input

        impl ::genai_llm::ToolDescription for #self_ty {
            fn name(&self) -> &'static str {
                #name
            }

            fn description(&self) -> &'static str {
                #description
            }

            fn parameters_schema(&self) -> ::serde_json::Value {
                let schema = ::schemars::schema_for!(#param_type);
                ::genai_llm::tool::function_schema(::serde_json::to_value(schema).unwrap_or_default())
            }
        }

        #[::async_trait::async_trait]
        impl #crate_name::tools::Tool for #self_ty {
            type Params = #param_type;

            async fn execute(&self, parameters: Self::Params) -> #crate_name::tools::ToolResult {
                <Self>::execute(self, parameters).await
            }
        }
    };

    Ok(expanded)
}
