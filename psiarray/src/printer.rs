use crate::{
    prelude::Nat,
    term::{Principal, Term},
};

#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct DisplayConfig {
    /// `ψ_0(1)` as `ω`
    pub abbreviate_omega: bool,
    /// `ψ_1(0)` as `Ω`
    pub abbreviate_big_omega: bool,
    /// `ψ(a,b)` instead of `ψ_a(b)`
    pub explicit_pair_form: bool,
    /// `ψ(b)` instead of `ψ_0(b)`
    pub drop_zero_subscript: bool,
    pub tex_output: bool,
}

#[derive(PartialEq, Eq, Clone, Copy, derive_more::Display, Debug)]
pub enum DisplayOption {
    #[display(fmt = "omega")]
    AbbreviateOmega,
    #[display(fmt = "Omega")]
    AbbreviateBigOmega,
    #[display(fmt = "pair")]
    ExplicitPairForm,
    #[display(fmt = "nosub")]
    DropZeroSubscript,
    #[display(fmt = "tex")]
    TexOutput,
}

impl DisplayOption {
    pub const ALL: [DisplayOption; 5] = [
        DisplayOption::AbbreviateOmega,
        DisplayOption::AbbreviateBigOmega,
        DisplayOption::ExplicitPairForm,
        DisplayOption::DropZeroSubscript,
        DisplayOption::TexOutput,
    ];

    /// Accepts the long name or the one-letter alias.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "omega" | "o" => DisplayOption::AbbreviateOmega,
            "Omega" | "O" => DisplayOption::AbbreviateBigOmega,
            "pair" | "a" => DisplayOption::ExplicitPairForm,
            "nosub" | "b" => DisplayOption::DropZeroSubscript,
            "tex" | "t" => DisplayOption::TexOutput,
            _ => return None,
        })
    }

    pub fn description(self) -> &'static str {
        match self {
            DisplayOption::AbbreviateOmega => "write ψ_0(1) as ω",
            DisplayOption::AbbreviateBigOmega => "write ψ_1(0) as Ω",
            DisplayOption::ExplicitPairForm => "write ψ_a(b) as ψ(a,b)",
            DisplayOption::DropZeroSubscript => "write ψ_0(b) as ψ(b)",
            DisplayOption::TexOutput => "output TeX",
        }
    }
}

impl DisplayConfig {
    pub fn get(&self, option: DisplayOption) -> bool {
        match option {
            DisplayOption::AbbreviateOmega => self.abbreviate_omega,
            DisplayOption::AbbreviateBigOmega => self.abbreviate_big_omega,
            DisplayOption::ExplicitPairForm => self.explicit_pair_form,
            DisplayOption::DropZeroSubscript => self.drop_zero_subscript,
            DisplayOption::TexOutput => self.tex_output,
        }
    }

    pub fn with(mut self, option: DisplayOption, on: bool) -> Self {
        let flag = match option {
            DisplayOption::AbbreviateOmega => &mut self.abbreviate_omega,
            DisplayOption::AbbreviateBigOmega => &mut self.abbreviate_big_omega,
            DisplayOption::ExplicitPairForm => &mut self.explicit_pair_form,
            DisplayOption::DropZeroSubscript => &mut self.drop_zero_subscript,
            DisplayOption::TexOutput => &mut self.tex_output,
        };
        *flag = on;
        self
    }

    /// Inline math block for TeX output, the text itself otherwise.
    pub fn wrap(&self, rendered: &str) -> String {
        if self.tex_output {
            format!("${rendered}$")
        } else {
            rendered.to_string()
        }
    }
}

const ONE_FORMS: [&str; 4] = ["ψ(0)", "ψ_{0}(0)", "ψ_0(0)", "ψ(0,0)"];
const OMEGA_FORMS: [&str; 4] = ["ψ(1)", "ψ_{0}(1)", "ψ_0(1)", "ψ(0,1)"];
const BIG_OMEGA_FORMS: [&str; 3] = ["ψ_{1}(0)", "ψ_1(0)", "ψ(1,0)"];
const TEX_ESCAPES: [(&str, &str); 3] = [("ψ", r"\psi"), ("ω", r"\omega"), ("Ω", r"\Omega")];

pub fn render(term: &Term, config: &DisplayConfig) -> String {
    let mut out = structural(term, config);
    replace_all(&mut out, &ONE_FORMS, "1");
    if config.abbreviate_omega {
        replace_all(&mut out, &OMEGA_FORMS, "ω");
    }
    if config.abbreviate_big_omega {
        replace_all(&mut out, &BIG_OMEGA_FORMS, "Ω");
    }
    if config.tex_output {
        for (symbol, escape) in TEX_ESCAPES {
            out = out.replace(symbol, escape);
        }
    }
    collapse_ones(&out)
}

fn replace_all(out: &mut String, forms: &[&str], to: &str) {
    for form in forms {
        *out = out.replace(form, to);
    }
}

/// `1+1+...+1` as its count.
fn collapse_ones(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(i) = rest.find('1') {
        out.push_str(&rest[..i]);
        let mut count = 1;
        rest = &rest[i + 1..];
        while let Some(tail) = rest.strip_prefix("+1") {
            count += 1;
            rest = tail;
        }
        out.push_str(&count.to_string());
    }
    out.push_str(rest);
    out
}

/// The term spelled out in full, before any abbreviation.
fn structural(term: &Term, config: &DisplayConfig) -> String {
    enum Instr<'a> {
        T(&'a Term),
        P(&'a Principal),
        Print(&'static str),
    }

    let mut out = String::new();
    let mut stack = vec![Instr::T(term)];
    while let Some(instr) = stack.pop() {
        match instr {
            Instr::T(t) if t.is_zero() => out.push('0'),
            Instr::T(t) => {
                for (i, p) in t.principals().iter().enumerate().rev() {
                    stack.push(Instr::P(p));
                    if i > 0 {
                        stack.push(Instr::Print("+"));
                    }
                }
            }
            Instr::P(p) => {
                out.push_str(&opening(p.sub(), config));
                stack.push(Instr::Print(")"));
                stack.push(Instr::T(p.arg()));
            }
            Instr::Print(s) => out.push_str(s),
        }
    }
    out
}

/// Everything of `ψ_sub(arg)` up to the argument.
fn opening(sub: Nat, config: &DisplayConfig) -> String {
    if config.drop_zero_subscript && sub == 0 {
        "ψ(".to_string()
    } else if config.explicit_pair_form {
        format!("ψ({sub},")
    } else if config.tex_output {
        format!("ψ_{{{sub}}}(")
    } else {
        format!("ψ_{sub}(")
    }
}
