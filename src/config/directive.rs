//! Directive Parser
//!
//! 文本形式的 handler 配置：
//!
//! ```text
//! # 行内形式
//! base64_redirect https://redir.example/go/
//!
//! # 块形式
//! base64_redirect {
//!     target "https://redir.example/go/"
//! }
//! ```
//!
//! 一条指令 = 名称 + 同一行上剩余的 token；单独的 `{` 开启嵌套块，单独的 `}` 关闭。

use thiserror::Error;

/// 指令解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("line {line}: unterminated quoted string")]
    UnterminatedQuote { line: usize },

    #[error("line {line}: unexpected '{token}'")]
    UnexpectedToken { line: usize, token: String },

    #[error("line {line}: block opened here is never closed")]
    UnclosedBlock { line: usize },

    #[error("line {line}: wrong argument count for '{directive}'")]
    ArgCount { line: usize, directive: String },

    #[error("line {line}: unrecognized subdirective '{name}'")]
    UnknownSubdirective { line: usize, name: String },

    #[error("line {line}: '{name}' specified more than once")]
    Duplicate { line: usize, name: String },
}

/// 解析后的指令节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    pub args: Vec<String>,
    pub block: Vec<Directive>,
    /// 指令名所在行（从 1 开始）
    pub line: usize,
}

impl Directive {
    /// 要求恰好一个参数
    pub fn single_arg(&self) -> Result<&str, DirectiveError> {
        match self.args.as_slice() {
            [arg] => Ok(arg),
            _ => Err(DirectiveError::ArgCount {
                line: self.line,
                directive: self.name.clone(),
            }),
        }
    }
}

#[derive(Debug)]
struct Token {
    text: String,
    /// 起始行
    line: usize,
    /// 结束行；只有跨行的带引号 token 与 `line` 不同
    end_line: usize,
    quoted: bool,
}

impl Token {
    fn is(&self, s: &str) -> bool {
        !self.quoted && self.text == s
    }
}

/// 解析指令文本
pub fn parse(input: &str) -> Result<Vec<Directive>, DirectiveError> {
    let tokens = tokenize(input)?;
    let mut pos = 0;
    parse_block(&tokens, &mut pos, None)
}

fn tokenize(input: &str) -> Result<Vec<Token>, DirectiveError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    let mut line = 1;

    while let Some(&c) = chars.peek() {
        if c == '\n' {
            line += 1;
            chars.next();
            continue;
        }
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '#' {
            while let Some(&c) = chars.peek() {
                if c == '\n' {
                    break;
                }
                chars.next();
            }
            continue;
        }

        let start = line;
        if c == '"' {
            chars.next();
            let mut text = String::new();
            loop {
                match chars.next() {
                    None => return Err(DirectiveError::UnterminatedQuote { line: start }),
                    Some('"') => break,
                    Some('\\') => match chars.peek() {
                        Some(&next @ ('"' | '\\')) => {
                            text.push(next);
                            chars.next();
                        }
                        _ => text.push('\\'),
                    },
                    Some(c) => {
                        if c == '\n' {
                            line += 1;
                        }
                        text.push(c);
                    }
                }
            }
            tokens.push(Token {
                text,
                line: start,
                end_line: line,
                quoted: true,
            });
        } else {
            let mut text = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                text.push(c);
                chars.next();
            }
            tokens.push(Token {
                text,
                line: start,
                end_line: start,
                quoted: false,
            });
        }
    }

    Ok(tokens)
}

/// `opened_at` 为当前块 `{` 所在行；顶层为 None
fn parse_block(
    tokens: &[Token],
    pos: &mut usize,
    opened_at: Option<usize>,
) -> Result<Vec<Directive>, DirectiveError> {
    let mut directives = Vec::new();

    loop {
        let Some(tok) = tokens.get(*pos) else {
            return match opened_at {
                Some(line) => Err(DirectiveError::UnclosedBlock { line }),
                None => Ok(directives),
            };
        };

        if tok.is("}") {
            if opened_at.is_none() {
                return Err(DirectiveError::UnexpectedToken {
                    line: tok.line,
                    token: tok.text.clone(),
                });
            }
            *pos += 1;
            return Ok(directives);
        }
        if tok.is("{") {
            return Err(DirectiveError::UnexpectedToken {
                line: tok.line,
                token: tok.text.clone(),
            });
        }

        let mut directive = Directive {
            name: tok.text.clone(),
            args: Vec::new(),
            block: Vec::new(),
            line: tok.line,
        };
        // 同一指令的下一个 token 必须从上一个 token 结束的那一行开始
        let mut last_line = tok.end_line;
        *pos += 1;

        while let Some(tok) = tokens.get(*pos) {
            if tok.line != last_line || tok.is("}") {
                break;
            }
            last_line = tok.end_line;
            *pos += 1;
            if tok.is("{") {
                directive.block = parse_block(tokens, pos, Some(tok.line))?;
                break;
            }
            directive.args.push(tok.text.clone());
        }

        directives.push(directive);
    }
}
