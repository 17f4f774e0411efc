use super::{Fingerprint, strs};

fn fingerprint(name: &str, regexes: &[&str]) -> Fingerprint {
    Fingerprint {
        name: name.to_string(),
        regexes: strs(regexes),
    }
}

/// Error pages and database driver messages leaked in response bodies.
pub fn default_error_fingerprints() -> Vec<Fingerprint> {
    vec![
        fingerprint(
            "PHP error",
            &[
                r"(?i)php (warning|error)",
                r"(?i)include_path",
                r"(?i)undefined (variable|index)",
                r"(?i)expect(s*) parameter [A-Za-z0-9_-]{1,30}",
                r"(?i)call to undefined method",
                r"(?i)failed to open stream",
                r"(?i)cannot modify header information",
                r"(?i)(syntax|parse|fatal) error",
                r"(?i)safe mode restriction in effect",
                r"(?i)uncaught exception",
            ],
        ),
        fingerprint(
            "General error",
            &[r"(?i)(fatal|critical|severe|high|medium|low) error"],
        ),
        fingerprint(
            "Debug information",
            &[r"(?i)Debug trace", r"(?i)stack trace:"],
        ),
        fingerprint(
            "MySQL error",
            &[
                r"(?i)valid MySQL result",
                r"(?i)check the manual that (fits|corresponds to) your MySQL server version",
                r"(?i)MySQLSyntaxErrorException",
                r"(?i)MySqlException",
                r"(?i)MySql error",
                r"(?i)Unknown column ",
                r"(?i)SQL syntax.*?MySQL",
                r"(?i)Warning.*?mysqli?",
                r"(?i)com\.mysql\.jdbc",
                r"(?i)Zend_Db_(Adapter|Statement)_Mysqli_Exception",
                r"(?i)Syntax error or access violation",
            ],
        ),
        fingerprint(
            "MariaDB error",
            &[
                r"(?i)check the manual that (fits|corresponds to) your MariaDB server version",
                r"(?i)MariaDB error",
            ],
        ),
        fingerprint(
            "PostgreSQL error",
            &[
                r"(?i)valid PostgreSQL result",
                r"(?i)PG::SyntaxError:",
                r"(?i)PSQLException",
                r"(?i)PostgreSQL query failed",
                r"(?i)ERROR: parser: parse error at or near",
                r"(?i)PostgreSQL error",
                r"(?i)PostgreSQL.*?ERROR",
                r"(?i)Warning.*?\Wpg_",
                r"(?i)Npgsql\.",
                r"(?i)org\.postgresql\.util\.PSQLException",
                r"(?i)ERROR:\s\ssyntax error at or near",
                r"(?i)org\.postgresql\.jdbc",
            ],
        ),
        fingerprint(
            "MSSQL error",
            &[
                r"(?i)Microsoft SQL error",
                r"(?i)Microsoft SQL Native Client error",
                r"(?i)ODBC SQL Server Driver",
                r"(?i)Unclosed quotation mark after the character string",
                r"(?i)SQLServer JDBC Driver",
                r"(?i)Driver.*? SQL[-_ ]*Server",
                r"(?i)OLE DB.*? SQL Server",
                r"(?i)\bSQL Server[^&<>]+Driver",
                r"(?i)Warning.*?\W(mssql|sqlsrv)_",
                r"(?i)\bSQL Server[^&<>]+[0-9a-fA-F]{8}",
                r"(?i)System\.Data\.SqlClient\.SqlException",
                r"(?is)Exception.*?\bRoadhouse\.Cms\.",
                r"(?i)\[SQL Server\]",
                r"(?i)ODBC Driver \d+ for SQL Server",
                r"(?i)com\.jnetdirect\.jsql",
                r"(?i)macromedia\.jdbc\.sqlserver",
                r"(?i)Zend_Db_(Adapter|Statement)_Sqlsrv_Exception",
                r"(?i)com\.microsoft\.sqlserver\.jdbc",
                r"(?i)SQL(Srv|Server)Exception",
            ],
        ),
        fingerprint(
            "OracleDB error",
            &[r"(?i)(\bORA-\d{5}|Oracle error|Oracle.*Driver|Warning.*\Woci_.*|Warning.*\Wora_.*)"],
        ),
        fingerprint(
            "IBMDB2 error",
            &[r"(?i)(CLI Driver.*DB2|DB2 SQL error|\bdb2_\w+\(|SQLSTATE.+SQLCODE)"],
        ),
        fingerprint(
            "SQLite error",
            &[concat!(
                r"(?i)(SQLite/JDBCDriver|SQLite\.Exception|System\.Data\.SQLite\.SQLiteException",
                r"|Warning.*sqlite_.*|Warning.*SQLite3::|\[SQLITE_ERROR\])"
            )],
        ),
    ]
}
